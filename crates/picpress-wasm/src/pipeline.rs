//! Whole-pipeline WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { run_pipeline, run_pipeline_with_options } from '@picpress/wasm';
//!
//! const webp = run_pipeline(bytes, 'jpeg', 'photo', 80);
//!
//! const thumb = run_pipeline_with_options(bytes, 'jpeg', {
//!   preset: 'photo',
//!   quality: 70,
//!   maxEdge: 512,
//! });
//! ```

use picpress_core::{run_pipeline_with, EncodedArtifact, PipelineError, PipelineOptions};
use wasm_bindgen::prelude::*;

use crate::decode::parse_format;
use crate::error::{options_error, to_js_error};
use crate::types::JsEncodedArtifact;

/// Decode a JPEG or PNG source and encode it to WebP.
///
/// # Arguments
///
/// * `bytes` - The source file bytes as a `Uint8Array`
/// * `format` - `"jpeg"` or `"png"`
/// * `preset` - One of `default`, `photo`, `picture`, `drawing`, `icon`, `text`
/// * `quality` - Quality factor from 0 (smallest) to 100 (best)
///
/// # Errors
///
/// Throws a `DecodeError`, `ConfigError` or `EncodeError` named after the
/// stage that failed.
#[wasm_bindgen]
pub fn run_pipeline(
    bytes: &[u8],
    format: &str,
    preset: &str,
    quality: f32,
) -> Result<JsEncodedArtifact, JsValue> {
    let options = PipelineOptions {
        preset: preset.to_string(),
        quality,
        ..PipelineOptions::default()
    };
    run(bytes, format, &options)
        .map(JsEncodedArtifact::from_artifact)
        .map_err(to_js_error)
}

/// Run the pipeline with an options object.
///
/// `options` is a plain object with optional fields `preset`, `quality`,
/// `method`, `lossless` and `maxEdge`; `undefined` uses the defaults.
#[wasm_bindgen]
pub fn run_pipeline_with_options(
    bytes: &[u8],
    format: &str,
    options: JsValue,
) -> Result<JsEncodedArtifact, JsValue> {
    let options = parse_options(options).map_err(to_js_error)?;
    run(bytes, format, &options)
        .map(JsEncodedArtifact::from_artifact)
        .map_err(to_js_error)
}

/// Check an options object without encoding anything.
///
/// # Errors
///
/// Throws the `ConfigError` that running the pipeline would report.
#[wasm_bindgen]
pub fn validate_options(options: JsValue) -> Result<(), JsValue> {
    let options = parse_options(options).map_err(to_js_error)?;
    options.build_config().map(|_| ()).map_err(to_js_error)
}

fn parse_options(options: JsValue) -> Result<PipelineOptions, picpress_core::ConfigError> {
    if options.is_undefined() || options.is_null() {
        return Ok(PipelineOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(options_error)
}

fn run(
    bytes: &[u8],
    format: &str,
    options: &PipelineOptions,
) -> Result<EncodedArtifact, PipelineError> {
    let format = parse_format(format)?;
    run_pipeline_with(bytes, format, options)
}
