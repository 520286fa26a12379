//! WebP encoding of decoded pictures.
//!
//! The compression itself is libwebp's `WebPEncode`, reached through the
//! `webp` crate. Native output buffers are copied into an owned artifact and
//! released before `encode` returns, on success and on failure.

use thiserror::Error;

use crate::config::EncodeConfig;
use crate::decode::{decode_webp, DecodeError, PictureBuffer, PixelLayout};

/// Largest width or height a WebP bitstream can describe.
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Errors that can occur during WebP encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height exceeds what the bitstream can store
    #[error("Picture is {width}x{height}, larger than the WebP limit of {max} pixels per side")]
    DimensionsTooLarge { width: u32, height: u32, max: u32 },

    /// libwebp reported a failure
    #[error("WebP encoding failed: {0}")]
    EncodingFailed(String),

    /// libwebp reported success but wrote nothing
    #[error("WebP encoder produced no output")]
    EmptyOutput,
}

/// Compressed WebP bitstream produced by [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    bytes: Vec<u8>,
}

impl EncodedArtifact {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the artifact back into a picture buffer.
    pub fn decode(&self) -> Result<PictureBuffer, DecodeError> {
        decode_webp(&self.bytes)
    }
}

impl AsRef<[u8]> for EncodedArtifact {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<EncodedArtifact> for Vec<u8> {
    fn from(artifact: EncodedArtifact) -> Self {
        artifact.bytes
    }
}

/// Encode a picture to WebP.
///
/// Both arguments are consumed: a picture and its config are paired for
/// exactly one encode and released when it finishes.
///
/// # Panics
///
/// Panics if `config` has not been validated. Passing an unvalidated config
/// is a programming error in the caller, not a property of the input data.
///
/// # Errors
///
/// Returns `EncodeError::DimensionsTooLarge` for pictures wider or taller
/// than [`WEBP_MAX_DIMENSION`], and `EncodeError::EncodingFailed` or
/// `EncodeError::EmptyOutput` when libwebp fails.
pub fn encode(picture: PictureBuffer, config: EncodeConfig) -> Result<EncodedArtifact, EncodeError> {
    assert!(
        config.is_validated(),
        "encode requires a validated config, got state {:?}",
        config.state()
    );

    let (width, height) = (picture.width(), picture.height());
    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(EncodeError::DimensionsTooLarge {
            width,
            height,
            max: WEBP_MAX_DIMENSION,
        });
    }

    let raw_config = config
        .to_libwebp()
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let encoder = match picture.layout() {
        PixelLayout::Rgb => webp::Encoder::from_rgb(picture.pixels(), width, height),
        PixelLayout::Rgba => webp::Encoder::from_rgba(picture.pixels(), width, height),
    };

    let memory = encoder
        .encode_advanced(&raw_config)
        .map_err(|e| EncodeError::EncodingFailed(format!("{e:?}")))?;

    if memory.is_empty() {
        return Err(EncodeError::EmptyOutput);
    }

    let bytes = memory.to_vec();
    tracing::trace!(
        width,
        height,
        layout = %picture.layout(),
        lossless = config.is_lossless(),
        output_len = bytes.len(),
        "picture encoded"
    );

    Ok(EncodedArtifact { bytes })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
