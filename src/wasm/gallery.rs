//! Lesson 002: textured planes mirroring DOM elements, synced to page scroll,
//! with a hover distortion.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::{Mat4, Vec2};
use wasm_bindgen::prelude::*;
use web_sys::WebGl2RenderingContext as GL;
use web_sys::{HtmlElement, WebGlBuffer, WebGlTexture};

use super::gl::{create_ibo, create_vbo, texture_from_image, ProgramDesc, ShaderProgram, Uniform};
use super::dom::{self, Listeners};
use super::render;
use crate::camera::{plane_model, plane_translation, Camera};
use crate::error::{DemoError, Result};
use crate::hover::HoverAnimation;
use crate::mesh::plane_geometry;
use crate::params::{GalleryParams, ScrollEffect};
use crate::scroll::ScrollState;

const DEFAULT_PLANE_SELECTOR: &str = ".webgl-plane";
const PLANE_SEGMENTS: u16 = 10;

const UNIFORMS: [&str; 12] = [
    "mvpMatrix",
    "textureUnit0",
    "textureUnit1",
    "progress",
    "texResolution0",
    "texResolution1",
    "meshResolution",
    "scrollDiff",
    "scrollEffect",
    "distortionStrength",
    "distortionFrequency",
    "distortionSpeed",
];

struct Plane {
    element: HtmlElement,
    vbos: [WebGlBuffer; 2],
    ibo: WebGlBuffer,
    index_count: i32,
    textures: [WebGlTexture; 2],
    tex_resolution: [[f32; 2]; 2],
    size: Vec2,
    model: Mat4,
    hover: HoverAnimation,
}

struct Gallery {
    planes: Vec<Plane>,
    camera: Camera,
    scroll: ScrollState,
    params: GalleryParams,
    viewport: Vec2,
}

impl Gallery {
    /// Re-reads element sizes and refits the camera to a new viewport.
    fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.camera.fit(width, height);
        for plane in &mut self.planes {
            plane.size = Vec2::new(
                plane.element.client_width() as f32,
                plane.element.client_height() as f32,
            );
        }
    }

    /// Moves every plane over its element at the current scroll offset.
    fn place(&mut self) {
        let scroll = self.scroll.position();
        for plane in &mut self.planes {
            let offset = Vec2::new(
                plane.element.offset_left() as f32,
                plane.element.offset_top() as f32,
            );
            let translation = plane_translation(self.viewport, plane.size, offset, scroll);
            plane.model = plane_model(plane.size, translation);
        }
    }
}

/// Handle returned to JavaScript for a running gallery.
#[wasm_bindgen]
pub struct GalleryDemo {
    running: render::RunFlag,
    state: Rc<RefCell<Gallery>>,
    listeners: RefCell<Listeners>,
}

#[wasm_bindgen]
impl GalleryDemo {
    /// Stops the render loop and detaches the resize and hover listeners.
    pub fn stop(&self) {
        self.running.set(false);
        self.listeners.borrow_mut().clear();
    }

    /// 0 none, 1 rgbShift, 2 grayScale, 3 luminance.
    #[wasm_bindgen(js_name = setScrollEffect)]
    pub fn set_scroll_effect(&self, code: u32) -> std::result::Result<(), JsValue> {
        self.state.borrow_mut().params.scroll_effect = ScrollEffect::try_from(code)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setDistortionStrength)]
    pub fn set_distortion_strength(&self, value: f32) {
        self.state.borrow_mut().params.set_distortion_strength(value);
    }

    #[wasm_bindgen(js_name = setDistortionFrequency)]
    pub fn set_distortion_frequency(&self, value: f32) {
        self.state.borrow_mut().params.set_distortion_frequency(value);
    }

    #[wasm_bindgen(js_name = setDistortionSpeed)]
    pub fn set_distortion_speed(&self, value: f32) {
        self.state.borrow_mut().params.set_distortion_speed(value);
    }
}

/// Builds one plane per element matching `plane_selector` (default
/// `.webgl-plane`) and starts drawing. Each element names its two textures in
/// `data-tex-src0` and `data-tex-src1`.
#[wasm_bindgen(js_name = startGallery)]
pub async fn start_gallery(
    canvas: JsValue,
    plane_selector: Option<String>,
) -> std::result::Result<GalleryDemo, JsValue> {
    let selector = plane_selector.unwrap_or_else(|| DEFAULT_PLANE_SELECTOR.to_string());
    Ok(setup(&canvas, &selector).await?)
}

async fn setup(target: &JsValue, selector: &str) -> Result<GalleryDemo> {
    let canvas = dom::resolve_canvas(target)?;
    let gl = dom::webgl_context(&canvas, true)?;

    let vertex_source = dom::fetch_text("./main.vert").await?;
    let fragment_source = dom::fetch_text("./main.frag").await?;
    let program = ShaderProgram::new(
        &gl,
        ProgramDesc {
            vertex_source: &vertex_source,
            fragment_source: &fragment_source,
            attributes: &[("position", 3), ("texCoord", 2)],
            uniforms: &UNIFORMS,
        },
    )?;

    let params = GalleryParams::default();
    let mut planes = Vec::new();
    for element in plane_elements(selector)? {
        planes.push(build_plane(&gl, element, &params).await?);
    }
    log::info!("gallery built with {} planes", planes.len());

    let (width, height) = dom::fit_to_window(&canvas)?;
    let mut gallery = Gallery {
        planes,
        camera: Camera::default(),
        scroll: ScrollState::default(),
        params,
        viewport: Vec2::ZERO,
    };
    gallery.scroll.update(dom::window()?.scroll_y()? as f32);
    gallery.resize(width as f32, height as f32);
    gallery.place();
    let state = Rc::new(RefCell::new(gallery));

    gl.clear_color(0.0, 0.0, 0.0, 0.0);
    gl.clear_depth(1.0);
    gl.enable(GL::DEPTH_TEST);

    let mut listeners = Listeners::default();
    {
        let state = state.clone();
        render::fit_canvas_on_resize(canvas.clone(), &mut listeners, move |width, height| {
            state.borrow_mut().resize(width as f32, height as f32);
        })?;
    }
    add_hover_listeners(&state, &mut listeners)?;

    let running: render::RunFlag = Rc::new(Cell::new(true));
    let demo = GalleryDemo {
        running: running.clone(),
        state: state.clone(),
        listeners: RefCell::new(listeners),
    };

    let window = dom::window()?;
    render::start(running, move |_| {
        let now = dom::now();
        let mut gallery = state.borrow_mut();
        gallery.scroll.update(window.scroll_y()? as f32);
        gallery.place();

        gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        program.use_program();

        let params = gallery.params;
        let scroll_diff = gallery.scroll.diff();
        for plane in &gallery.planes {
            let mvp = gallery.camera.mvp(plane.model);

            gl.active_texture(GL::TEXTURE0);
            gl.bind_texture(GL::TEXTURE_2D, Some(&plane.textures[0]));
            gl.active_texture(GL::TEXTURE1);
            gl.bind_texture(GL::TEXTURE_2D, Some(&plane.textures[1]));

            program.set_attributes(&plane.vbos, Some(&plane.ibo));
            program.set_uniforms(&[
                Uniform::Mat4(mvp.to_cols_array()),
                Uniform::Int(0),
                Uniform::Int(1),
                Uniform::Float(plane.hover.progress(now)),
                Uniform::Vec2(plane.tex_resolution[0]),
                Uniform::Vec2(plane.tex_resolution[1]),
                Uniform::Vec2(plane.size.to_array()),
                Uniform::Float(scroll_diff),
                Uniform::Float(params.scroll_effect.uniform()),
                Uniform::Float(params.distortion_strength()),
                Uniform::Float(params.distortion_frequency()),
                Uniform::Float(params.distortion_speed()),
            ])?;
            gl.draw_elements_with_i32(GL::TRIANGLES, plane.index_count, GL::UNSIGNED_SHORT, 0);
        }
        Ok(())
    })?;

    Ok(demo)
}

fn plane_elements(selector: &str) -> Result<Vec<HtmlElement>> {
    let nodes = dom::document()?.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

async fn build_plane(gl: &GL, element: HtmlElement, params: &GalleryParams) -> Result<Plane> {
    let geometry = plane_geometry(1.0, 1.0, [1.0; 4], PLANE_SEGMENTS, PLANE_SEGMENTS)?;
    let vbos = [
        create_vbo(gl, &geometry.position)?,
        create_vbo(gl, &geometry.tex_coord)?,
    ];
    let ibo = create_ibo(gl, &geometry.index)?;
    log::debug!(
        "plane mesh: {} vertices, {} triangles",
        geometry.vertex_count(),
        geometry.triangle_count()
    );

    let dataset = element.dataset();
    let mut textures = Vec::with_capacity(2);
    let mut tex_resolution = [[0.0; 2]; 2];
    for (slot, key) in ["texSrc0", "texSrc1"].into_iter().enumerate() {
        let src = dataset
            .get(key)
            .ok_or_else(|| DemoError::MissingElement(format!("data-tex-src{slot} on plane")))?;
        let image = dom::load_image(&src).await?;
        tex_resolution[slot] = [image.natural_width() as f32, image.natural_height() as f32];
        textures.push(texture_from_image(gl, &image)?);
    }
    let textures: [WebGlTexture; 2] = textures
        .try_into()
        .map_err(|_| DemoError::ResourceCreation("plane textures"))?;

    Ok(Plane {
        element,
        vbos,
        ibo,
        index_count: geometry.index.len() as i32,
        textures,
        tex_resolution,
        size: Vec2::ZERO,
        model: Mat4::IDENTITY,
        hover: HoverAnimation::new(params.hover_duration_ms),
    })
}

fn add_hover_listeners(state: &Rc<RefCell<Gallery>>, listeners: &mut Listeners) -> Result<()> {
    let elements: Vec<HtmlElement> = state
        .borrow()
        .planes
        .iter()
        .map(|plane| plane.element.clone())
        .collect();

    for (index, element) in elements.iter().enumerate() {
        let enter_state = state.clone();
        let on_enter = Closure::wrap(Box::new(move || {
            if let Some(plane) = enter_state.borrow_mut().planes.get_mut(index) {
                plane.hover.on_enter(dom::now());
            }
        }) as Box<dyn FnMut()>);
        listeners.add(element, "mouseenter", on_enter)?;

        let leave_state = state.clone();
        let on_leave = Closure::wrap(Box::new(move || {
            if let Some(plane) = leave_state.borrow_mut().planes.get_mut(index) {
                plane.hover.on_leave(dom::now());
            }
        }) as Box<dyn FnMut()>);
        listeners.add(element, "mouseleave", on_leave)?;
    }
    Ok(())
}
