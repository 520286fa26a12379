//! Source-to-WebP encode pipeline.
//!
//! Three stages run in a fixed order, each reporting its own failure:
//!
//! 1. **Decoding** - source bytes to a [`PictureBuffer`], optionally downsized
//! 2. **Configuring** - initialize, apply preset, validate
//! 3. **Encoding** - picture + validated config to an [`EncodedArtifact`]
//!
//! There is no retry and no partial recovery. Everything a stage allocated
//! is owned by a local binding, so it is released on every early return.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, EncodeConfig, Preset};
use crate::decode::{decode, resize_to_fit, DecodeError, FilterType, SourceFormat};
use crate::encode::{encode, EncodeError, EncodedArtifact};

/// Pipeline stage, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decoding,
    Configuring,
    Encoding,
}

/// Failure of one pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

impl PipelineError {
    /// Stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Decode(_) => Stage::Decoding,
            PipelineError::Config(_) => Stage::Configuring,
            PipelineError::Encode(_) => Stage::Encoding,
        }
    }
}

/// Per-request pipeline settings.
///
/// Field names are camelCase when (de)serialized so a host can pass a plain
/// object such as `{ "preset": "photo", "quality": 80, "maxEdge": 2048 }`.
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineOptions {
    /// Preset name: default, photo, picture, drawing, icon or text.
    pub preset: String,
    /// Quality factor (0 to 100).
    pub quality: f32,
    /// Effort level (0 to 6); the preset's default when absent.
    pub method: Option<u8>,
    /// Encode losslessly; quality then controls compression effort.
    pub lossless: bool,
    /// Downsize so that neither side exceeds this many pixels.
    pub max_edge: Option<u32>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            preset: Preset::Default.name().to_string(),
            quality: 75.0,
            method: None,
            lossless: false,
            max_edge: None,
        }
    }
}

impl PipelineOptions {
    pub fn new(preset: Preset, quality: f32) -> Self {
        Self {
            preset: preset.name().to_string(),
            quality,
            ..Self::default()
        }
    }

    /// Build and validate the encode configuration these options describe.
    pub fn build_config(&self) -> Result<EncodeConfig, ConfigError> {
        let mut config = EncodeConfig::initialize();
        config.apply_preset_named(&self.preset, self.quality)?;
        if let Some(method) = self.method {
            config.set_method(method);
        }
        if self.lossless {
            config.set_lossless(true);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Decode `bytes`, encode them to WebP with `preset` at `quality`.
///
/// # Errors
///
/// Returns the first stage failure, see [`PipelineError::stage`].
pub fn run_pipeline(
    bytes: &[u8],
    format: SourceFormat,
    preset: Preset,
    quality: f32,
) -> Result<EncodedArtifact, PipelineError> {
    run_pipeline_with(bytes, format, &PipelineOptions::new(preset, quality))
}

/// Run the pipeline with extended options.
///
/// # Errors
///
/// Returns the first stage failure, see [`PipelineError::stage`].
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        format = %format,
        input_len = bytes.len(),
        preset = %options.preset,
        quality = options.quality,
    )
)]
pub fn run_pipeline_with(
    bytes: &[u8],
    format: SourceFormat,
    options: &PipelineOptions,
) -> Result<EncodedArtifact, PipelineError> {
    let picture = decode(bytes, format)
        .and_then(|picture| match options.max_edge {
            Some(max_edge) => resize_to_fit(picture, max_edge, FilterType::Lanczos3),
            None => Ok(picture),
        })
        .map_err(PipelineError::from)
        .inspect_err(log_failure)?;
    tracing::debug!(
        width = picture.width(),
        height = picture.height(),
        layout = %picture.layout(),
        "source decoded"
    );

    let config = options
        .build_config()
        .map_err(PipelineError::from)
        .inspect_err(log_failure)?;
    tracing::debug!(
        method = config.method(),
        lossless = config.is_lossless(),
        "encoder configured"
    );

    let artifact = encode(picture, config)
        .map_err(PipelineError::from)
        .inspect_err(log_failure)?;
    tracing::debug!(output_len = artifact.len(), "picture encoded");

    Ok(artifact)
}

fn log_failure(err: &PipelineError) {
    tracing::warn!(stage = ?err.stage(), error = %err, "pipeline stage failed");
}


// ============================================================================
// Property-Based Tests
// ============================================================================
