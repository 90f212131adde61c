//! Window, document and resource-loading helpers.

use std::any::Any;

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, EventTarget, HtmlCanvasElement, HtmlImageElement, Response,
    WebGl2RenderingContext as GL, Window,
};

use crate::error::{DemoError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(DemoError::MissingElement("window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(DemoError::MissingElement("document".into()))
}

/// Resolves a canvas given either the element itself or its id.
pub fn resolve_canvas(target: &JsValue) -> Result<HtmlCanvasElement> {
    if let Some(canvas) = target.dyn_ref::<HtmlCanvasElement>() {
        return Ok(canvas.clone());
    }
    let Some(id) = target.as_string() else {
        return Err(DemoError::InvalidCanvas(format!("{target:?}")));
    };
    document()?
        .get_element_by_id(&id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or(DemoError::InvalidCanvas(format!("#{id}")))
}

/// Acquires a WebGL2 context, optionally with an alpha-enabled drawing buffer.
pub fn webgl_context(canvas: &HtmlCanvasElement, alpha: bool) -> Result<GL> {
    let options = Object::new();
    Reflect::set(&options, &"alpha".into(), &alpha.into())?;
    canvas
        .get_context_with_context_options("webgl2", &options)?
        .ok_or(DemoError::WebGlUnsupported)?
        .dyn_into::<GL>()
        .map_err(|_| DemoError::WebGlUnsupported)
}

/// Inner size of the browser window in CSS pixels.
pub fn viewport_size() -> Result<(f64, f64)> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or_default();
    let height = window.inner_height()?.as_f64().unwrap_or_default();
    Ok((width, height))
}

pub fn fit_to_window(canvas: &HtmlCanvasElement) -> Result<(f64, f64)> {
    let (width, height) = viewport_size()?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Ok((width, height))
}

/// High-resolution timestamp in milliseconds.
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default()
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Function,
    _closure: Box<dyn Any>,
}

/// Event listeners owned by one demo. They stay attached until [`clear`]
/// is called or the set is dropped.
///
/// [`clear`]: Listeners::clear
#[derive(Default)]
pub struct Listeners(Vec<Listener>);

impl Listeners {
    /// Attaches `closure` to `target` for `event` and keeps it alive.
    pub fn add<T>(&mut self, target: &EventTarget, event: &'static str, closure: Closure<T>) -> Result<()>
    where
        T: ?Sized + WasmClosure + 'static,
    {
        let callback: Function = closure.as_ref().unchecked_ref::<Function>().clone();
        target.add_event_listener_with_callback(event, &callback)?;
        self.0.push(Listener {
            target: target.clone(),
            event,
            callback,
            _closure: Box::new(closure),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Detaches every listener and drops its closure.
    pub fn clear(&mut self) {
        for listener in self.0.drain(..) {
            if let Err(err) = listener
                .target
                .remove_event_listener_with_callback(listener.event, &listener.callback)
            {
                log::warn!("could not remove `{}` listener: {err:?}", listener.event);
            }
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Fetches a text resource such as a shader source, relative to the page.
pub async fn fetch_text(path: &str) -> Result<String> {
    let fail = |reason: String| DemoError::Fetch {
        path: path.to_string(),
        reason,
    };

    let response: Response = JsFuture::from(window()?.fetch_with_str(path))
        .await
        .map_err(|e| fail(DemoError::from(e).to_string()))?
        .dyn_into()
        .map_err(|_| fail("not a response".into()))?;
    if !response.ok() {
        return Err(fail(format!("status {}", response.status())));
    }

    let body = response
        .text()
        .map_err(|e| fail(DemoError::from(e).to_string()))?;
    JsFuture::from(body)
        .await
        .map_err(|e| fail(DemoError::from(e).to_string()))?
        .as_string()
        .ok_or_else(|| fail("body is not text".into()))
}

/// Loads and decodes an image; resolves once the browser fires `load`.
pub async fn load_image(src: &str) -> Result<HtmlImageElement> {
    let image = HtmlImageElement::new()?;
    let loaded = Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);

    let result = JsFuture::from(loaded).await;
    image.set_onload(None);
    image.set_onerror(None);
    result.map_err(|_| DemoError::ImageLoad(src.to_string()))?;

    log::debug!("loaded {src} ({}x{})", image.natural_width(), image.natural_height());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::*;
    use web_sys::Event;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn detached_canvas() -> HtmlCanvasElement {
        document()
            .unwrap()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn canvas_with_2d_context_has_no_webgl() {
        let canvas = detached_canvas();
        assert!(canvas.get_context("2d").unwrap().is_some());

        let err = webgl_context(&canvas, true).unwrap_err();
        assert_eq!(err, DemoError::WebGlUnsupported);
        assert_eq!(err.to_string(), "webgl not supported");
    }

    #[wasm_bindgen_test]
    fn cleared_listeners_stop_firing() {
        let target: EventTarget = document().unwrap().create_element("div").unwrap().into();
        let hits = Rc::new(Cell::new(0));

        let mut listeners = Listeners::default();
        let counter = hits.clone();
        let closure = Closure::wrap(Box::new(move || counter.set(counter.get() + 1)) as Box<dyn FnMut()>);
        listeners.add(&target, "ping", closure).unwrap();
        assert_eq!(listeners.len(), 1);

        target.dispatch_event(&Event::new("ping").unwrap()).unwrap();
        assert_eq!(hits.get(), 1);

        listeners.clear();
        assert_eq!(listeners.len(), 0);
        target.dispatch_event(&Event::new("ping").unwrap()).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    fn dropping_listeners_detaches_them() {
        let target: EventTarget = document().unwrap().create_element("div").unwrap().into();
        let hits = Rc::new(Cell::new(0));
        {
            let mut listeners = Listeners::default();
            let counter = hits.clone();
            let closure = Closure::wrap(Box::new(move || counter.set(counter.get() + 1)) as Box<dyn FnMut()>);
            listeners.add(&target, "ping", closure).unwrap();
        }
        // a dropped closure still attached would throw here
        target.dispatch_event(&Event::new("ping").unwrap()).unwrap();
        assert_eq!(hits.get(), 0);
    }
}
