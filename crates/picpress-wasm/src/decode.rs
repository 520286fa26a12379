//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_source`] - Decode a JPEG or PNG source into a picture
//! - [`decode_webp`] - Decode a WebP file back into a picture
//! - [`is_webp`] - Check if bytes carry a WebP container header
//! - [`resize_to_fit`] - Downsize a picture to fit within a max edge
//!
//! # Example
//!
//! ```typescript
//! import { decode_source, resize_to_fit } from '@picpress/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const picture = decode_source(bytes, 'jpeg');
//! const preview = resize_to_fit(picture, 1024, 2); // Lanczos3 filter
//! ```

use picpress_core::decode::{self, DecodeError, SourceFormat};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::{filter_from_u8, JsPictureBuffer};

/// Decode a JPEG or PNG source into a picture.
///
/// JPEG sources have their EXIF orientation applied. Sources with an alpha
/// channel decode to RGBA, everything else to RGB.
///
/// # Arguments
///
/// * `bytes` - The source file bytes as a `Uint8Array`
/// * `format` - `"jpeg"` (or `"jpg"`) or `"png"`
///
/// # Errors
///
/// Throws a `DecodeError` if the format name is unknown, the bytes do not
/// match the format, or the file is corrupted.
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8], format: &str) -> Result<JsPictureBuffer, JsValue> {
    parse_format(format)
        .and_then(|format| decode::decode(bytes, format))
        .map(JsPictureBuffer::from_picture)
        .map_err(to_js_error)
}

/// Decode a WebP file (for example a previous pipeline result) into a picture.
#[wasm_bindgen]
pub fn decode_webp(bytes: &[u8]) -> Result<JsPictureBuffer, JsValue> {
    decode::decode_webp(bytes)
        .map(JsPictureBuffer::from_picture)
        .map_err(to_js_error)
}

#[wasm_bindgen]
pub fn is_webp(bytes: &[u8]) -> bool {
    decode::is_webp(bytes)
}

/// Resize a picture to fit within a maximum edge size, preserving aspect ratio.
///
/// Pictures already within `max_edge` are returned unchanged (no upscaling).
///
/// # Arguments
///
/// * `picture` - The source picture
/// * `max_edge` - Maximum size for the longest edge in pixels
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear, 2=Lanczos3 (default)
#[wasm_bindgen]
pub fn resize_to_fit(
    picture: &JsPictureBuffer,
    max_edge: u32,
    filter: u8,
) -> Result<JsPictureBuffer, JsValue> {
    decode::resize_to_fit(picture.to_picture(), max_edge, filter_from_u8(filter))
        .map(JsPictureBuffer::from_picture)
        .map_err(to_js_error)
}

/// Parse a host-supplied format name.
pub(crate) fn parse_format(format: &str) -> Result<SourceFormat, DecodeError> {
    format.parse().map_err(DecodeError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use picpress_core::decode::{PictureBuffer, PixelLayout};
    use picpress_core::{EncodeConfig, Preset};

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("jpeg").unwrap(), SourceFormat::Jpeg);
        assert_eq!(parse_format("JPG").unwrap(), SourceFormat::Jpeg);
        assert_eq!(parse_format("png").unwrap(), SourceFormat::Png);
    }

    #[test]
    fn test_parse_format_unknown() {
        assert!(matches!(
            parse_format("gif"),
            Err(DecodeError::Unsupported(_))
        ));
    }

    #[test]
    fn test_is_webp() {
        let picture = PictureBuffer::new(3, 3, PixelLayout::Rgb, vec![1u8; 27]).unwrap();
        let config = EncodeConfig::build(Preset::Default, 75.0).unwrap();
        let artifact = picpress_core::encode(picture, config).unwrap();

        assert!(is_webp(artifact.as_bytes()));
        assert!(!is_webp(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!is_webp(&[]));
    }
}
