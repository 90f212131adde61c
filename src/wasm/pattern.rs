//! Lesson 003: a full-screen quad for fragment-shader pattern experiments.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::WebGl2RenderingContext as GL;

use super::gl::{create_vbo, ProgramDesc, ShaderProgram, Uniform};
use super::dom::{self, Listeners};
use super::render;
use crate::clock::ScaledClock;
use crate::error::Result;
use crate::params::PatternParams;

/// Clip-space quad drawn as a triangle strip.
const QUAD: [f32; 12] = [
    -1.0, 1.0, 0.0, //
    1.0, 1.0, 0.0, //
    -1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0,
];

#[wasm_bindgen]
pub struct PatternDemo {
    running: render::RunFlag,
    params: Rc<RefCell<PatternParams>>,
    listeners: RefCell<Listeners>,
}

#[wasm_bindgen]
impl PatternDemo {
    pub fn stop(&self) {
        self.running.set(false);
        self.listeners.borrow_mut().clear();
    }

    #[wasm_bindgen(js_name = setTimeScale)]
    pub fn set_time_scale(&self, value: f32) {
        self.params.borrow_mut().set_time_scale(value);
    }

    /// Sets `param[index]`; returns `false` for an index outside 0..4.
    #[wasm_bindgen(js_name = setParam)]
    pub fn set_param(&self, index: usize, value: f32) -> bool {
        self.params.borrow_mut().set_param(index, value)
    }

    /// Sets a component by its label, e.g. `"wave-height"`.
    #[wasm_bindgen(js_name = setParamByName)]
    pub fn set_param_by_name(&self, name: &str, value: f32) -> bool {
        match PatternParams::index_of(name) {
            Some(index) => self.set_param(index, value),
            None => false,
        }
    }
}

#[wasm_bindgen(js_name = startPattern)]
pub async fn start_pattern(canvas: JsValue) -> std::result::Result<PatternDemo, JsValue> {
    Ok(setup(&canvas).await?)
}

async fn setup(target: &JsValue) -> Result<PatternDemo> {
    let canvas = dom::resolve_canvas(target)?;
    let gl = dom::webgl_context(&canvas, false)?;

    let vertex_source = dom::fetch_text("./main.vert").await?;
    let fragment_source = dom::fetch_text("./main.frag").await?;
    let program = ShaderProgram::new(
        &gl,
        ProgramDesc {
            vertex_source: &vertex_source,
            fragment_source: &fragment_source,
            attributes: &[("position", 3)],
            uniforms: &["resolution", "time", "param"],
        },
    )?;
    let vbos = [create_vbo(&gl, &QUAD)?];

    let (width, height) = dom::fit_to_window(&canvas)?;
    gl.viewport(0, 0, width as i32, height as i32);
    let mut listeners = Listeners::default();
    {
        let gl = gl.clone();
        render::fit_canvas_on_resize(canvas.clone(), &mut listeners, move |width, height| {
            gl.viewport(0, 0, width as i32, height as i32);
        })?;
    }

    gl.clear_color(0.1, 0.1, 0.1, 1.0);
    program.use_program();
    program.set_attributes(&vbos, None);
    log::info!("pattern playground ready");

    let running: render::RunFlag = Rc::new(Cell::new(true));
    let params = Rc::new(RefCell::new(PatternParams::default()));
    let demo = PatternDemo {
        running: running.clone(),
        params: params.clone(),
        listeners: RefCell::new(listeners),
    };

    let mut clock = ScaledClock::new(dom::now(), params.borrow().time_scale());
    render::start(running, move |_| {
        let current = *params.borrow();
        clock.scale = current.time_scale();
        let time = clock.tick(dom::now());

        gl.clear(GL::COLOR_BUFFER_BIT);
        program.set_uniforms(&[
            Uniform::Vec2([canvas.width() as f32, canvas.height() as f32]),
            Uniform::Float(time),
            Uniform::Vec4(current.param()),
        ])?;
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, (QUAD.len() / 3) as i32);
        Ok(())
    })?;

    Ok(demo)
}
