//! Core types for source decoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were supplied.
    #[error("Empty input buffer")]
    EmptyInput,

    /// The leading bytes do not carry the declared format's signature.
    #[error("Input does not match the declared {expected} signature")]
    FormatMismatch { expected: SourceFormat },

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoder does not support a feature used by the file.
    #[error("Unsupported image feature: {0}")]
    Unsupported(String),

    /// Out of memory during decoding.
    #[error("Out of memory during decoding")]
    OutOfMemory,

    /// Decoded dimensions and pixel data disagree.
    #[error("Invalid picture buffer: {width}x{height} {layout} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        layout: PixelLayout,
        expected: usize,
        actual: usize,
    },

    /// A requested output size is not usable.
    #[error("Invalid target size: {0}")]
    InvalidSize(String),
}

/// Declared format of a compressed source image.
///
/// The caller always declares the format; the decoder never guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    /// Leading bytes every file of this format starts with.
    pub fn signature(self) -> &'static [u8] {
        match self {
            SourceFormat::Jpeg => &[0xFF, 0xD8, 0xFF],
            SourceFormat::Png => &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        }
    }

    /// Check whether `bytes` start with this format's signature.
    pub fn matches(self, bytes: &[u8]) -> bool {
        bytes.starts_with(self.signature())
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            SourceFormat::Jpeg => image::ImageFormat::Jpeg,
            SourceFormat::Png => image::ImageFormat::Png,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Jpeg => f.write_str("jpeg"),
            SourceFormat::Png => f.write_str("png"),
        }
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(SourceFormat::Jpeg),
            "png" => Ok(SourceFormat::Png),
            other => Err(format!("Unknown or unsupported source format: {other}")),
        }
    }
}

/// Channel order of a picture buffer. Samples are always 8-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelLayout {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl PixelLayout {
    /// Bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    #[inline]
    pub fn has_alpha(self) -> bool {
        self == PixelLayout::Rgba
    }
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelLayout::Rgb => f.write_str("RGB"),
            PixelLayout::Rgba => f.write_str("RGBA"),
        }
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded picture: 8-bit samples, row-major, tightly packed.
///
/// The buffer length always equals `width * height * channels`, and both
/// dimensions are non-zero. Fields are private so that neither can change
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    pixels: Vec<u8>,
}

impl PictureBuffer {
    /// Create a picture buffer, checking dimensions against the pixel data.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        pixels: Vec<u8>,
    ) -> Result<Self, DecodeError> {
        // None when the size does not fit in usize (32-bit targets included).
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(layout.channels()));

        match expected {
            Some(expected) if width != 0 && height != 0 && pixels.len() == expected => {}
            _ => {
                return Err(DecodeError::InvalidBuffer {
                    width,
                    height,
                    layout,
                    expected: expected.unwrap_or(usize::MAX),
                    actual: pixels.len(),
                })
            }
        }

        Ok(Self {
            width,
            height,
            layout,
            pixels,
        })
    }

    /// Convert any decoded image into the canonical layout.
    ///
    /// Sources with an alpha channel become RGBA, everything else RGB.
    /// Higher bit depths are reduced to 8 bits per sample.
    pub fn from_dynamic(img: image::DynamicImage) -> Result<Self, DecodeError> {
        if img.color().has_alpha() {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self::new(width, height, PixelLayout::Rgba, rgba.into_raw())
        } else {
            let rgb = img.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self::new(width, height, PixelLayout::Rgb, rgb.into_raw())
        }
    }

    /// Convert to an image::DynamicImage for further processing.
    pub fn to_dynamic(&self) -> Option<image::DynamicImage> {
        match self.layout {
            PixelLayout::Rgb => image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(image::DynamicImage::ImageRgb8),
            PixelLayout::Rgba => {
                image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(image::DynamicImage::ImageRgba8)
            }
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// Raw samples in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_source_format_from_str() {
        assert_eq!("jpeg".parse::<SourceFormat>(), Ok(SourceFormat::Jpeg));
        assert_eq!("JPG".parse::<SourceFormat>(), Ok(SourceFormat::Jpeg));
        assert_eq!(" png ".parse::<SourceFormat>(), Ok(SourceFormat::Png));
        assert!("gif".parse::<SourceFormat>().is_err());
        assert!("".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn test_source_format_signature() {
        assert!(SourceFormat::Jpeg.matches(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!SourceFormat::Jpeg.matches(&[0xFF, 0xD8]));
        assert!(SourceFormat::Png.matches(b"\x89PNG\r\n\x1a\n rest"));
        assert!(!SourceFormat::Png.matches(&[0xFF, 0xD8, 0xFF, 0xE0]));
    }

    #[test]
    fn test_source_format_display_roundtrip() {
        for format in [SourceFormat::Jpeg, SourceFormat::Png] {
            assert_eq!(format.to_string().parse::<SourceFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_pixel_layout_channels() {
        assert_eq!(PixelLayout::Rgb.channels(), 3);
        assert_eq!(PixelLayout::Rgba.channels(), 4);
        assert!(PixelLayout::Rgba.has_alpha());
        assert!(!PixelLayout::Rgb.has_alpha());
    }

    #[test]
    fn test_picture_buffer_creation() {
        let img = PictureBuffer::new(100, 50, PixelLayout::Rgb, vec![0u8; 100 * 50 * 3]).unwrap();

        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_size(), 15000);
        assert!(!img.has_alpha());
    }

    #[test]
    fn test_picture_buffer_rgba() {
        let img = PictureBuffer::new(4, 2, PixelLayout::Rgba, vec![255u8; 4 * 2 * 4]).unwrap();
        assert!(img.has_alpha());
        assert_eq!(img.byte_size(), 32);
    }

    #[test]
    fn test_picture_buffer_rejects_overflowing_size() {
        let result = PictureBuffer::new(u32::MAX, u32::MAX, PixelLayout::Rgba, vec![]);
        assert!(matches!(
            result,
            Err(DecodeError::InvalidBuffer {
                expected: usize::MAX,
                actual: 0,
                ..
            })
        ));

        // Wraps to zero with a 32-bit usize.
        let result = PictureBuffer::new(65536, 16384, PixelLayout::Rgba, vec![]);
        assert!(matches!(result, Err(DecodeError::InvalidBuffer { actual: 0, .. })));
    }

    #[test]
    fn test_picture_buffer_rejects_zero_dimensions() {
        let result = PictureBuffer::new(0, 0, PixelLayout::Rgb, vec![]);
        assert!(matches!(result, Err(DecodeError::InvalidBuffer { .. })));

        let result = PictureBuffer::new(10, 0, PixelLayout::Rgb, vec![]);
        assert!(matches!(result, Err(DecodeError::InvalidBuffer { .. })));
    }

    #[test]
    fn test_picture_buffer_rejects_length_mismatch() {
        // RGBA-sized data declared as RGB
        let result = PictureBuffer::new(2, 2, PixelLayout::Rgb, vec![0u8; 16]);
        match result {
            Err(DecodeError::InvalidBuffer {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 16);
            }
            other => panic!("Expected InvalidBuffer, got: {:?}", other),
        }
    }

    #[test]
    fn test_from_dynamic_keeps_alpha() {
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 128]));
        let pic = PictureBuffer::from_dynamic(image::DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(pic.layout(), PixelLayout::Rgba);
        assert_eq!(&pic.pixels()[0..4], &[10, 20, 30, 128]);
    }

    #[test]
    fn test_from_dynamic_expands_grayscale() {
        let luma = image::GrayImage::from_pixel(2, 2, image::Luma([77]));
        let pic = PictureBuffer::from_dynamic(image::DynamicImage::ImageLuma8(luma)).unwrap();
        assert_eq!(pic.layout(), PixelLayout::Rgb);
        assert_eq!(&pic.pixels()[0..3], &[77, 77, 77]);
    }

    #[test]
    fn test_to_dynamic_roundtrip() {
        let pixels: Vec<u8> = (0..2 * 2 * 4).map(|i| i as u8).collect();
        let pic = PictureBuffer::new(2, 2, PixelLayout::Rgba, pixels.clone()).unwrap();
        let back = PictureBuffer::from_dynamic(pic.to_dynamic().unwrap()).unwrap();
        assert_eq!(back.pixels(), &pixels[..]);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::FormatMismatch {
            expected: SourceFormat::Png,
        };
        assert_eq!(err.to_string(), "Input does not match the declared png signature");

        let err = DecodeError::EmptyInput;
        assert_eq!(err.to_string(), "Empty input buffer");
    }
}
