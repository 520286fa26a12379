//! Conversion of core errors into JavaScript `Error` objects.
//!
//! The `name` of each thrown error is the kind of failure (`DecodeError`,
//! `ConfigError` or `EncodeError`) so callers can branch on it without
//! parsing messages.

use std::fmt::Display;

use picpress_core::{ConfigError, DecodeError, EncodeError, PipelineError};
use wasm_bindgen::JsValue;

pub(crate) const DECODE_ERROR: &str = "DecodeError";
pub(crate) const CONFIG_ERROR: &str = "ConfigError";
pub(crate) const ENCODE_ERROR: &str = "EncodeError";

/// Core error that knows which JavaScript error name it maps to.
pub(crate) trait ErrorKind: Display {
    fn kind(&self) -> &'static str;
}

impl ErrorKind for DecodeError {
    fn kind(&self) -> &'static str {
        DECODE_ERROR
    }
}

impl ErrorKind for ConfigError {
    fn kind(&self) -> &'static str {
        CONFIG_ERROR
    }
}

impl ErrorKind for EncodeError {
    fn kind(&self) -> &'static str {
        ENCODE_ERROR
    }
}

impl ErrorKind for PipelineError {
    fn kind(&self) -> &'static str {
        match self {
            PipelineError::Decode(err) => err.kind(),
            PipelineError::Config(err) => err.kind(),
            PipelineError::Encode(err) => err.kind(),
        }
    }
}

/// Build a JavaScript `Error` named after the error kind.
pub(crate) fn to_js_error<E: ErrorKind>(err: E) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    js_err.set_name(err.kind());
    js_err.into()
}

/// Malformed options objects are reported as configuration errors.
pub(crate) fn options_error(err: serde_wasm_bindgen::Error) -> ConfigError {
    ConfigError::InconsistentParameters {
        parameter: "options",
        reason: err.to_string(),
    }
}
