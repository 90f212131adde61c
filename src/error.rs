use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can abort a demo during setup.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DemoError {
    #[error("invalid argument: {0} is not a canvas element")]
    InvalidCanvas(String),
    #[error("webgl not supported")]
    WebGlUnsupported,
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("failed to link program: {0}")]
    ProgramLink(String),
    #[error("failed to create {0}")]
    ResourceCreation(&'static str),
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },
    #[error("failed to load image {0}")]
    ImageLoad(String),
    #[error("pixel buffer holds {len} bytes, expected {expected} for {width}x{height} RGBA")]
    InvalidImage {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },
    #[error("invalid geometry: {0}")]
    Geometry(String),
    #[error("unknown scroll effect {0}")]
    UnknownScrollEffect(u32),
    #[error("expected {expected} uniform values, got {got}")]
    UniformCount { expected: usize, got: usize },
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, DemoError>;

impl From<JsValue> for DemoError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        DemoError::Js(message)
    }
}

impl From<DemoError> for JsValue {
    fn from(err: DemoError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
