//! JPEG source decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

use super::source::{check_source, decode_dynamic};
use super::{DecodeError, Orientation, PictureBuffer, SourceFormat};

/// Decode a JPEG image from bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw JPEG file bytes
///
/// # Returns
///
/// An RGB `PictureBuffer` with correct orientation applied.
///
/// # Errors
///
/// Returns `DecodeError::FormatMismatch` if the bytes are not JPEG.
/// Returns `DecodeError::CorruptedFile` if the JPEG is corrupted or truncated.
pub fn decode_jpeg(bytes: &[u8]) -> Result<PictureBuffer, DecodeError> {
    // The image decoder pads missing scan data instead of failing.
    check_source(bytes, SourceFormat::Jpeg)?;
    check_complete(bytes)?;

    let img = decode_dynamic(bytes, SourceFormat::Jpeg)?;

    let orientation = extract_orientation(bytes);
    let oriented_img = apply_orientation(img, orientation);

    PictureBuffer::from_dynamic(oriented_img)
}

const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;

/// Walk the marker segments after SOI and require an EOI marker after at
/// least one scan. Bytes after EOI are ignored.
fn check_complete(bytes: &[u8]) -> Result<(), DecodeError> {
    let truncated =
        || DecodeError::CorruptedFile("truncated JPEG: no end-of-image marker".to_string());

    let mut pos = 2;
    let mut seen_scan = false;
    loop {
        // Fill bytes before a marker
        while bytes.get(pos) == Some(&0xFF) && bytes.get(pos + 1) == Some(&0xFF) {
            pos += 1;
        }

        let marker = match (bytes.get(pos), bytes.get(pos + 1)) {
            (Some(0xFF), Some(&marker)) => marker,
            (Some(_), Some(_)) => {
                return Err(DecodeError::CorruptedFile(format!(
                    "expected JPEG marker at offset {pos}"
                )))
            }
            _ => return Err(truncated()),
        };
        pos += 2;

        match marker {
            MARKER_EOI if seen_scan => return Ok(()),
            MARKER_EOI => {
                return Err(DecodeError::CorruptedFile(
                    "JPEG ends before any scan data".to_string(),
                ))
            }
            0x01 | 0xD0..=0xD7 => {}
            _ => {
                let length = match bytes.get(pos..pos + 2) {
                    Some(&[hi, lo]) => u16::from_be_bytes([hi, lo]) as usize,
                    _ => return Err(truncated()),
                };
                if length < 2 {
                    return Err(DecodeError::CorruptedFile(format!(
                        "invalid JPEG segment length {length}"
                    )));
                }
                pos += length;
                if pos > bytes.len() {
                    return Err(truncated());
                }
                if marker == MARKER_SOS {
                    seen_scan = true;
                    pos = skip_entropy_data(bytes, pos).ok_or_else(truncated)?;
                }
            }
        }
    }
}

/// Offset of the first marker after entropy-coded data. Stuffed zero bytes
/// and restart markers belong to the data.
fn skip_entropy_data(bytes: &[u8], mut pos: usize) -> Option<usize> {
    while pos + 1 < bytes.len() {
        if bytes[pos] != 0xFF {
            pos += 1;
            continue;
        }
        match bytes[pos + 1] {
            0x00 | 0xD0..=0xD7 => pos += 2,
            0xFF => pos += 1,
            _ => return Some(pos),
        }
    }
    None
}

/// Extract EXIF orientation value from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
