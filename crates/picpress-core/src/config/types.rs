//! Error and state types for encoder configuration.

use thiserror::Error;

/// Errors raised while building or validating an [`EncodeConfig`](super::EncodeConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Quality is not a finite value in `0..=100`.
    #[error("Invalid quality {0}: must be between 0 and 100")]
    InvalidQuality(f32),

    /// Preset name is not one of the known content categories.
    #[error("Unknown preset \"{0}\": expected one of default, photo, picture, drawing, icon, text")]
    InvalidPreset(String),

    /// A parameter is out of range or contradicts another one.
    #[error("Inconsistent encoder parameter `{parameter}`: {reason}")]
    InconsistentParameters {
        parameter: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn inconsistent(parameter: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InconsistentParameters {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Lifecycle of an encode configuration.
///
/// Encoding is only allowed from `Validated`. Changing any parameter on a
/// validated config moves it back to `PresetApplied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigState {
    /// Baseline codec defaults, no preset applied yet.
    #[default]
    Uninitialized,
    /// A preset and quality have been applied.
    PresetApplied,
    /// All parameters passed validation.
    Validated,
}
