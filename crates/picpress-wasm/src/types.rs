//! WASM-compatible wrapper types for pictures and encoded output.
//!
//! This module provides JavaScript-friendly types that wrap the core picpress
//! types, handling the conversion between Rust and JavaScript data representations.

use picpress_core::decode::{FilterType, PictureBuffer, PixelLayout};
use picpress_core::EncodedArtifact;
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;

/// A decoded picture wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep the picture in WASM memory and pass
/// it straight to `encode_picture` when the pixels are not needed in JavaScript.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsPictureBuffer {
    inner: PictureBuffer,
}

#[wasm_bindgen]
impl JsPictureBuffer {
    /// Create a picture from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Picture width in pixels
    /// * `height` - Picture height in pixels
    /// * `has_alpha` - `true` for RGBA pixels (4 bytes each), `false` for RGB (3 bytes)
    /// * `pixels` - Pixel data in row-major order
    ///
    /// # Errors
    ///
    /// Throws a `DecodeError` if the pixel data length does not match the dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        has_alpha: bool,
        pixels: Vec<u8>,
    ) -> Result<JsPictureBuffer, JsValue> {
        let layout = if has_alpha {
            PixelLayout::Rgba
        } else {
            PixelLayout::Rgb
        };
        PictureBuffer::new(width, height, layout, pixels)
            .map(Self::from_picture)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Whether pixels carry an alpha channel (RGBA) or not (RGB)
    #[wasm_bindgen(getter = hasAlpha)]
    pub fn has_alpha(&self) -> bool {
        self.inner.has_alpha()
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsPictureBuffer {
    pub(crate) fn from_picture(inner: PictureBuffer) -> Self {
        Self { inner }
    }

    /// Copy of the core picture, for core calls that consume their input.
    pub(crate) fn to_picture(&self) -> PictureBuffer {
        self.inner.clone()
    }
}

/// An encoded WebP file for JavaScript.
#[wasm_bindgen]
pub struct JsEncodedArtifact {
    inner: EncodedArtifact,
}

#[wasm_bindgen]
impl JsEncodedArtifact {
    /// Size of the WebP file in bytes
    #[wasm_bindgen(getter = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    /// Returns the WebP file as Uint8Array (a copy).
    ///
    /// ```typescript
    /// const blob = new Blob([artifact.bytes()], { type: 'image/webp' });
    /// ```
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }

    /// Decode the WebP file back into a picture.
    pub fn decode(&self) -> Result<JsPictureBuffer, JsValue> {
        self.inner
            .decode()
            .map(JsPictureBuffer::from_picture)
            .map_err(to_js_error)
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsEncodedArtifact {
    pub(crate) fn from_artifact(inner: EncodedArtifact) -> Self {
        Self { inner }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Lanczos3.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        _ => FilterType::Lanczos3,
    }
}
