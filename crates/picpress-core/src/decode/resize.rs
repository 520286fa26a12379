//! Downsizing of decoded pictures before encoding.

use super::{DecodeError, FilterType, PictureBuffer};

/// Resize a picture to fit within a maximum edge length while preserving aspect ratio.
///
/// The picture is scaled so that its longest edge equals `max_edge`. If it is
/// already no larger than `max_edge` it is returned unchanged, so pictures
/// are never upscaled. The pixel layout (alpha or not) is kept.
///
/// # Errors
///
/// Returns `DecodeError::InvalidSize` if `max_edge` is zero.
pub fn resize_to_fit(
    picture: PictureBuffer,
    max_edge: u32,
    filter: FilterType,
) -> Result<PictureBuffer, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidSize(
            "max edge must be non-zero".to_string(),
        ));
    }

    let (src_width, src_height) = (picture.width(), picture.height());
    if src_width <= max_edge && src_height <= max_edge {
        return Ok(picture);
    }

    let (new_width, new_height) = calculate_fit_dimensions(src_width, src_height, max_edge);

    let img = picture.to_dynamic().ok_or_else(|| {
        DecodeError::CorruptedFile("picture buffer could not be viewed as an image".to_string())
    })?;
    drop(picture);

    let resized = img.resize_exact(new_width, new_height, filter.to_image_filter());

    tracing::trace!(src_width, src_height, new_width, new_height, "picture resized");

    PictureBuffer::from_dynamic(resized)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
