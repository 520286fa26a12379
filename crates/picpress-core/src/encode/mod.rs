//! WebP encoding for decoded pictures.
//!
//! This module provides functionality for:
//! - Encoding a [`PictureBuffer`](crate::decode::PictureBuffer) with a
//!   validated [`EncodeConfig`](crate::config::EncodeConfig)
//! - Holding the produced bitstream as an owned [`EncodedArtifact`]
//!
//! # Examples
//!
//! ```ignore
//! use picpress_core::config::{EncodeConfig, Preset};
//! use picpress_core::encode::encode;
//!
//! let config = EncodeConfig::build(Preset::Photo, 80.0)?;
//! let artifact = encode(picture, config)?;
//! println!("Encoded {} bytes", artifact.len());
//! ```

mod picture;

pub use picture::{encode, EncodeError, EncodedArtifact, WEBP_MAX_DIMENSION};
