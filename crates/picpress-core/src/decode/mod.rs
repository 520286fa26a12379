//! Source decoding for the encode pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG sources into a canonical [`PictureBuffer`]
//! - Applying EXIF orientation to JPEG sources
//! - Downsizing pictures to a maximum edge before encoding
//! - Reading produced WebP artifacts back for verification
//!
//! # Picture layout
//!
//! Every decoded picture is 8 bits per sample, row-major and tightly packed,
//! in RGB order, or RGBA when the source carries alpha.
//!
//! # Examples
//!
//! ```ignore
//! use picpress_core::decode::{decode, SourceFormat};
//!
//! let png_bytes = std::fs::read("icon.png").unwrap();
//! let picture = decode(&png_bytes, SourceFormat::Png).unwrap();
//! println!("Decoded {}x{} picture", picture.width(), picture.height());
//! ```

mod artifact;
mod jpeg;
mod png;
mod resize;
mod source;
mod types;

pub use artifact::{decode_webp, is_webp};
pub use jpeg::{decode_jpeg, get_orientation};
pub use png::decode_png;
pub use resize::resize_to_fit;
pub use source::decode;
pub use types::{DecodeError, FilterType, Orientation, PictureBuffer, PixelLayout, SourceFormat};
