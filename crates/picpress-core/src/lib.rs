//! Picpress Core - Image transcoding library
//!
//! This crate turns JPEG and PNG sources into WebP, in three stages:
//! decoding into a [`PictureBuffer`], building a validated [`EncodeConfig`]
//! from a content [`Preset`] and a quality factor, and encoding into an
//! [`EncodedArtifact`].
//!
//! # Examples
//!
//! ```ignore
//! use picpress_core::{run_pipeline, Preset, SourceFormat};
//!
//! let webp = run_pipeline(&jpeg_bytes, SourceFormat::Jpeg, Preset::Photo, 80.0)?;
//! std::fs::write("out.webp", webp.as_bytes())?;
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, ConfigState, EncodeConfig, Preset};
pub use decode::{decode, decode_webp, DecodeError, PictureBuffer, PixelLayout, SourceFormat};
pub use encode::{encode, EncodeError, EncodedArtifact};
pub use pipeline::{run_pipeline, run_pipeline_with, PipelineError, PipelineOptions, Stage};
