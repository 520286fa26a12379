//! PNG source decoding.

use super::source::decode_dynamic;
use super::{DecodeError, PictureBuffer, SourceFormat};

/// Decode a PNG image from bytes.
///
/// Images carrying an alpha channel (RGBA, gray + alpha, or a `tRNS` chunk
/// expanded by the decoder) come back as RGBA; everything else as RGB.
/// 16-bit samples are reduced to 8 bits.
///
/// # Errors
///
/// Returns `DecodeError::FormatMismatch` if the bytes are not PNG.
/// Returns `DecodeError::CorruptedFile` if the PNG is corrupted or truncated.
pub fn decode_png(bytes: &[u8]) -> Result<PictureBuffer, DecodeError> {
    let img = decode_dynamic(bytes, SourceFormat::Png)?;
    PictureBuffer::from_dynamic(img)
}
