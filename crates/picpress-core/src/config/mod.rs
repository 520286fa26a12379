//! Encoder configuration.
//!
//! Builds and validates the parameters handed to the WebP encoder. Presets
//! and final validation are delegated to libwebp; this module adds the state
//! tracking and the recoverable error reporting around them.
//!
//! # Examples
//!
//! ```ignore
//! use picpress_core::config::{EncodeConfig, Preset};
//!
//! let mut config = EncodeConfig::initialize();
//! config.apply_preset(Preset::Photo, 80.0)?;
//! config.validate()?;
//! assert!(config.is_validated());
//! ```

mod encode_config;
mod preset;
mod types;

pub use encode_config::{EncodeConfig, MAX_METHOD};
pub use preset::Preset;
pub use types::{ConfigError, ConfigState};
