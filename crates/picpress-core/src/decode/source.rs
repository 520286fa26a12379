//! Format dispatch for source decoding.

use image::{DynamicImage, ImageError};

use super::{jpeg, png, DecodeError, PictureBuffer, SourceFormat};

/// Decode a compressed source image into a picture buffer.
///
/// The caller declares the format; bytes that do not carry that format's
/// signature are rejected with [`DecodeError::FormatMismatch`] rather than
/// handed to another decoder.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for an empty slice,
/// `DecodeError::FormatMismatch` when the signature is wrong, and
/// `DecodeError::CorruptedFile` for malformed or truncated data.
pub fn decode(bytes: &[u8], format: SourceFormat) -> Result<PictureBuffer, DecodeError> {
    match format {
        SourceFormat::Jpeg => jpeg::decode_jpeg(bytes),
        SourceFormat::Png => png::decode_png(bytes),
    }
}

/// Reject empty input and bytes without the declared format's signature.
pub(super) fn check_source(bytes: &[u8], format: SourceFormat) -> Result<(), DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    if !format.matches(bytes) {
        return Err(DecodeError::FormatMismatch { expected: format });
    }
    Ok(())
}

/// Check the input and run the `image` crate decoder for `format`.
pub(super) fn decode_dynamic(
    bytes: &[u8],
    format: SourceFormat,
) -> Result<DynamicImage, DecodeError> {
    check_source(bytes, format)?;

    let img = image::load_from_memory_with_format(bytes, format.to_image_format())
        .map_err(map_image_error)?;

    tracing::trace!(
        %format,
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "source decoded"
    );

    Ok(img)
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Limits(_) => DecodeError::OutOfMemory,
        ImageError::Unsupported(e) => DecodeError::Unsupported(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}
