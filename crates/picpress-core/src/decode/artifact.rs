//! Decoding of produced WebP artifacts.
//!
//! WebP is never accepted as a pipeline source; this exists so encoded output
//! can be checked by reading it back.

use super::{DecodeError, PictureBuffer, PixelLayout};

/// Decode a WebP bitstream with libwebp.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for an empty slice and
/// `DecodeError::CorruptedFile` when the RIFF container or the bitstream
/// cannot be read.
pub fn decode_webp(bytes: &[u8]) -> Result<PictureBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    if !is_webp(bytes) {
        return Err(DecodeError::CorruptedFile(
            "missing RIFF/WEBP header".to_string(),
        ));
    }

    let decoded = ::webp::Decoder::new(bytes).decode().ok_or_else(|| {
        DecodeError::CorruptedFile("libwebp could not decode the bitstream".to_string())
    })?;

    let layout = if decoded.is_alpha() {
        PixelLayout::Rgba
    } else {
        PixelLayout::Rgb
    };

    PictureBuffer::new(decoded.width(), decoded.height(), layout, decoded.to_vec())
}

/// Check for a `RIFF....WEBP` container header.
pub fn is_webp(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
}
