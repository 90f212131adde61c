//! Lesson 001: an image sampled into a point cloud that follows the pointer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};
use web_sys::WebGl2RenderingContext as GL;

use super::gl::{create_vbo, ProgramDesc, ShaderProgram, Uniform};
use super::dom::{self, Listeners};
use super::render;
use crate::error::{DemoError, Result};
use crate::params::PointCloudParams;
use crate::point_cloud::{centered_square, signed_pointer, FrameClock, PointCloud, STRIDE};

const DEFAULT_IMAGE: &str = "./cat03.png";
const SUB_CANVAS_ID: &str = "sub-canvas";

/// Handle returned to JavaScript for a running point cloud.
#[wasm_bindgen]
pub struct PointCloudDemo {
    running: render::RunFlag,
    params: Rc<RefCell<PointCloudParams>>,
    listeners: RefCell<Listeners>,
}

#[wasm_bindgen]
impl PointCloudDemo {
    /// Stops the render loop and detaches the resize and pointer listeners.
    pub fn stop(&self) {
        self.running.set(false);
        self.listeners.borrow_mut().clear();
    }

    #[wasm_bindgen(js_name = setDisplacement)]
    pub fn set_displacement(&self, value: f32) {
        self.params.borrow_mut().set_displacement(value);
    }

    pub fn displacement(&self) -> f32 {
        self.params.borrow().displacement()
    }
}

/// Loads the image and shaders, builds the point cloud and starts drawing.
///
/// `canvas` is the canvas element or its id. `image_src` defaults to
/// `./cat03.png`.
#[wasm_bindgen(js_name = startPointCloud)]
pub async fn start_point_cloud(
    canvas: JsValue,
    image_src: Option<String>,
) -> std::result::Result<PointCloudDemo, JsValue> {
    let image_src = image_src.unwrap_or_else(|| DEFAULT_IMAGE.to_string());
    Ok(setup(&canvas, &image_src).await?)
}

async fn setup(target: &JsValue, image_src: &str) -> Result<PointCloudDemo> {
    let image = dom::load_image(image_src).await?;

    let canvas = dom::resolve_canvas(target)?;
    let gl = dom::webgl_context(&canvas, true)?;

    let vertex_source = dom::fetch_text("./main.vert").await?;
    let fragment_source = dom::fetch_text("./main.frag").await?;
    let program = ShaderProgram::new(
        &gl,
        ProgramDesc {
            vertex_source: &vertex_source,
            fragment_source: &fragment_source,
            attributes: &[("position", STRIDE[0]), ("color", STRIDE[1]), ("size", STRIDE[2])],
            uniforms: &["displacement", "mouse", "time", "frame"],
        },
    )?;

    let sub_canvas = sub_canvas()?;
    let cloud = sample_image(&sub_canvas, &image)?;
    log::info!("point cloud built with {} points", cloud.vertex_count());
    let vbos = [
        create_vbo(&gl, &cloud.position)?,
        create_vbo(&gl, &cloud.color)?,
        create_vbo(&gl, &cloud.size)?,
    ];
    let vertex_count = cloud.vertex_count() as i32;

    let mut listeners = Listeners::default();
    dom::fit_to_window(&canvas)?;
    render::fit_canvas_on_resize(canvas.clone(), &mut listeners, move |width, height| {
        sub_canvas.set_width(width as u32);
        sub_canvas.set_height(height as u32);
    })?;
    gl.clear_color(1.0, 1.0, 1.0, 1.0);

    let mouse = Rc::new(Cell::new([0.0f32; 2]));
    {
        let mouse = mouse.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            if let Ok((width, height)) = dom::viewport_size() {
                mouse.set(signed_pointer(
                    f64::from(event.page_x()),
                    f64::from(event.page_y()),
                    width,
                    height,
                ));
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        listeners.add(&dom::window()?, "pointermove", on_move)?;
    }

    let running: render::RunFlag = Rc::new(Cell::new(true));
    let params = Rc::new(RefCell::new(PointCloudParams::default()));
    let demo = PointCloudDemo {
        running: running.clone(),
        params: params.clone(),
        listeners: RefCell::new(listeners),
    };

    let mut clock = FrameClock::default();
    render::start(running, move |_| {
        let (time, frame) = clock.tick(dom::now());

        gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);
        gl.clear(GL::COLOR_BUFFER_BIT);

        program.use_program();
        program.set_attributes(&vbos, None);
        program.set_uniforms(&[
            Uniform::Float(params.borrow().displacement()),
            Uniform::Vec2(mouse.get()),
            Uniform::Float(time),
            Uniform::Float(frame as f32),
        ])?;
        gl.draw_arrays(GL::POINTS, 0, vertex_count);
        Ok(())
    })?;

    Ok(demo)
}

/// The 2D canvas the image is rasterised into; a detached one is created when
/// the page doesn't provide `#sub-canvas`.
fn sub_canvas() -> Result<HtmlCanvasElement> {
    let document = dom::document()?;
    let element = match document.get_element_by_id(SUB_CANVAS_ID) {
        Some(element) => element,
        None => document.create_element("canvas")?,
    };
    element
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| DemoError::InvalidCanvas(format!("#{SUB_CANVAS_ID}")))
}

/// Draws `image` centred on a black, window-sized canvas and samples it.
fn sample_image(canvas: &HtmlCanvasElement, image: &HtmlImageElement) -> Result<PointCloud> {
    let (width, height) = dom::fit_to_window(canvas)?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(DemoError::ResourceCreation("2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| DemoError::ResourceCreation("2d context"))?;

    #[allow(deprecated)]
    ctx.set_fill_style(&JsValue::from_str("#000000"));
    ctx.fill_rect(0.0, 0.0, width, height);

    let (x, y, side) = centered_square(width, height);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, side, side)?;

    let data = ctx.get_image_data(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()))?;
    PointCloud::from_rgba(&data.data(), data.width(), data.height())
}
