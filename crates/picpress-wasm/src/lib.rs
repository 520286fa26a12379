//! Picpress WASM - WebAssembly bindings for Picpress
//!
//! This crate provides WASM bindings to expose the picpress-core encode
//! pipeline to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pictures and WebP output
//! - `decode` - Source decoding bindings (JPEG, PNG, WebP read-back, resize)
//! - `encode` - WebP encoding of decoded pictures
//! - `pipeline` - Whole-pipeline bindings and options validation
//!
//! Errors are thrown as JavaScript `Error` objects whose `name` is
//! `DecodeError`, `ConfigError` or `EncodeError`.
//!
//! # Usage
//!
//! ```typescript
//! import init, { run_pipeline } from '@picpress/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! try {
//!   const webp = run_pipeline(bytes, 'jpeg', 'photo', 80);
//!   console.log(`Encoded ${webp.byteLength} bytes`);
//! } catch (err) {
//!   if (err.name === 'DecodeError') showUnreadableFile();
//! }
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod error;
mod pipeline;
mod types;

// Re-export public types
pub use decode::{decode_source, decode_webp, is_webp, resize_to_fit};
pub use encode::encode_picture;
pub use pipeline::{run_pipeline, run_pipeline_with_options, validate_options};
pub use types::{JsEncodedArtifact, JsPictureBuffer};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
