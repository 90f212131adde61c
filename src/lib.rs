#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Small WebGL shader lessons compiled to WebAssembly.
//!
//! The geometry, camera and animation helpers are plain Rust and build on
//! every target so they can be tested on the host. Everything that touches
//! the DOM or a GL context lives in the `wasm` module.

pub mod camera;
pub mod clock;
pub mod easing;
pub mod error;
pub mod hover;
pub mod mesh;
pub mod params;
pub mod point_cloud;
pub mod scroll;

pub use error::DemoError;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod dom;
    mod gallery;
    mod gl;
    mod pattern;
    mod point_cloud;
    mod render;

    pub use dom::resolve_canvas;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("shader lessons loaded");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::resolve_canvas;

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
