//! Error kinds surfaced by field construction, colour changes and context setup.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Grid or scene parameter out of range at construction time.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// Unsupported value passed to a colour or theme entry point.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Rendering surface, context or storage could not be acquired.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
    #[error("shader {stage} failed: {log}")]
    Shader { stage: &'static str, log: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
