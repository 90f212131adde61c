use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::HtmlCanvasElement;

use super::dom::{self, Listeners};
use crate::error::Result;

/// Shared stop flag: the loop checks it once per frame and stops
/// rescheduling as soon as it reads `false`.
pub type RunFlag = Rc<Cell<bool>>;

/// Drives `frame` from `requestAnimationFrame` while `running` holds.
///
/// `frame` receives the high-resolution timestamp of the callback. An error
/// returned from a frame is logged and ends the loop.
pub fn start(running: RunFlag, mut frame: impl FnMut(f64) -> Result<()> + 'static) -> Result<()> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if !running.get() {
            log::info!("render loop stopped");
            return;
        }
        if let Err(err) = frame(timestamp) {
            log::error!("frame failed: {err}");
            running.set(false);
            return;
        }

        // schedule next
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = request_frame(callback) {
                log::error!("could not schedule next frame: {err}");
                running.set(false);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = g.borrow().as_ref() {
        request_frame(callback)?;
    }
    Ok(())
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32> {
    Ok(dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

/// Keeps `canvas` sized to the window and calls `on_resize` with the new
/// size after each change. The listener lives in `listeners`.
pub fn fit_canvas_on_resize(
    canvas: HtmlCanvasElement,
    listeners: &mut Listeners,
    mut on_resize: impl FnMut(f64, f64) + 'static,
) -> Result<()> {
    let resize_closure = Closure::wrap(Box::new(move || match dom::fit_to_window(&canvas) {
        Ok((width, height)) => on_resize(width, height),
        Err(err) => log::warn!("resize failed: {err}"),
    }) as Box<dyn FnMut()>);
    listeners.add(&dom::window()?, "resize", resize_closure)
}
