//! WebP encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_source, encode_picture } from '@picpress/wasm';
//!
//! const picture = decode_source(bytes, 'png');
//! const webp = encode_picture(picture, 'drawing', 90);
//! await writable.write(new Blob([webp.bytes()], { type: 'image/webp' }));
//! ```

use picpress_core::decode::PictureBuffer;
use picpress_core::{encode, EncodeConfig, EncodedArtifact, PipelineError};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::{JsEncodedArtifact, JsPictureBuffer};

/// Encode a decoded picture to WebP.
///
/// The picture is left untouched and can be encoded again with other settings.
///
/// # Arguments
///
/// * `picture` - The picture to encode
/// * `preset` - One of `default`, `photo`, `picture`, `drawing`, `icon`, `text`
/// * `quality` - Quality factor from 0 (smallest) to 100 (best)
///
/// # Errors
///
/// Throws a `ConfigError` for an unknown preset or out-of-range quality, and
/// an `EncodeError` if libwebp fails.
#[wasm_bindgen]
pub fn encode_picture(
    picture: &JsPictureBuffer,
    preset: &str,
    quality: f32,
) -> Result<JsEncodedArtifact, JsValue> {
    encode_with_preset(picture.to_picture(), preset, quality)
        .map(JsEncodedArtifact::from_artifact)
        .map_err(to_js_error)
}

fn encode_with_preset(
    picture: PictureBuffer,
    preset: &str,
    quality: f32,
) -> Result<EncodedArtifact, PipelineError> {
    let mut config = EncodeConfig::initialize();
    config.apply_preset_named(preset, quality)?;
    config.validate()?;
    Ok(encode(picture, config)?)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_picture_basic() {
        let picture = JsPictureBuffer::new(50, 50, false, vec![128u8; 50 * 50 * 3]).unwrap();
        let artifact = encode_picture(&picture, "default", 75.0).unwrap();

        let bytes = artifact.bytes();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[wasm_bindgen_test]
    fn test_encode_picture_keeps_input() {
        let picture = JsPictureBuffer::new(8, 8, true, vec![10u8; 8 * 8 * 4]).unwrap();
        assert!(encode_picture(&picture, "icon", 0.0).is_ok());
        assert!(encode_picture(&picture, "icon", 100.0).is_ok());
        assert_eq!(picture.width(), 8);
    }

    #[wasm_bindgen_test]
    fn test_encode_picture_invalid_quality() {
        let picture = JsPictureBuffer::new(4, 4, false, vec![0u8; 48]).unwrap();
        assert!(encode_picture(&picture, "photo", 101.0).is_err());
        assert!(encode_picture(&picture, "nope", 50.0).is_err());
    }
}
