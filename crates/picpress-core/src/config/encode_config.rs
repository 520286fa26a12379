//! Encoder configuration built on libwebp's presets and validation.
//!
//! A configuration goes through three steps before it can be paired with a
//! picture:
//!
//! 1. [`EncodeConfig::initialize`] - baseline codec defaults
//! 2. [`EncodeConfig::apply_preset`] - content preset and quality
//! 3. [`EncodeConfig::validate`] - bounds and consistency checks
//!
//! Every step either fully succeeds or leaves the config untouched.

use libwebp_sys::{WebPConfig, WebPValidateConfig};

use super::{ConfigError, ConfigState, Preset};

/// Highest method (effort) level libwebp understands.
pub const MAX_METHOD: u8 = 6;

/// Compression parameters for a single encode.
///
/// Create one per encode request. The struct is plain data and can be moved
/// between threads, but one instance must never drive two encodes at once.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeConfig {
    preset: Preset,
    quality: f32,
    method: u8,
    lossless: bool,
    sns_strength: u8,
    filter_strength: u8,
    filter_sharpness: u8,
    preprocessing: u8,
    segments: u8,
    pass: u8,
    alpha_quality: u8,
    near_lossless: u8,
    state: ConfigState,
}

impl Default for EncodeConfig {
    /// Same values as libwebp's `WebPConfigInit`.
    fn default() -> Self {
        Self {
            preset: Preset::Default,
            quality: 75.0,
            method: 4,
            lossless: false,
            sns_strength: 50,
            filter_strength: 60,
            filter_sharpness: 0,
            preprocessing: 0,
            segments: 4,
            pass: 1,
            alpha_quality: 100,
            near_lossless: 100,
            state: ConfigState::Uninitialized,
        }
    }
}

impl EncodeConfig {
    /// Baseline configuration with codec defaults, in the `Uninitialized` state.
    pub fn initialize() -> Self {
        Self::default()
    }

    /// Run all three steps: initialize, apply `preset` at `quality`, validate.
    pub fn build(preset: Preset, quality: f32) -> Result<Self, ConfigError> {
        let mut config = Self::initialize();
        config.apply_preset(preset, quality)?;
        config.validate()?;
        Ok(config)
    }

    /// Validated lossless configuration at maximum compression effort.
    pub fn build_lossless(preset: Preset) -> Result<Self, ConfigError> {
        let mut config = Self::initialize();
        config.apply_preset(preset, 100.0)?;
        config.set_lossless(true);
        config.set_method(MAX_METHOD);
        config.validate()?;
        Ok(config)
    }

    /// Apply a content preset and quality factor.
    ///
    /// The preset-governed fields (noise shaping, filter strength and
    /// sharpness, preprocessing, segments) are taken from libwebp's preset
    /// tables. Method, lossless mode and alpha settings are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidQuality` unless `quality` is finite and in
    /// `0..=100`. The config is not modified on error.
    pub fn apply_preset(&mut self, preset: Preset, quality: f32) -> Result<(), ConfigError> {
        check_quality(quality)?;

        let tuned = WebPConfig::new_with_preset(preset.to_libwebp(), quality).map_err(|_| {
            ConfigError::inconsistent("preset", "libwebp refused to initialize the preset")
        })?;

        self.preset = preset;
        self.quality = quality;
        self.sns_strength = to_u8(tuned.sns_strength);
        self.filter_strength = to_u8(tuned.filter_strength);
        self.filter_sharpness = to_u8(tuned.filter_sharpness);
        self.preprocessing = to_u8(tuned.preprocessing);
        self.segments = to_u8(tuned.segments);
        self.state = ConfigState::PresetApplied;

        tracing::trace!(%preset, quality, "preset applied");
        Ok(())
    }

    /// Apply a preset given by name, as supplied by a host application.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPreset` for an unknown name and
    /// `ConfigError::InvalidQuality` for an out-of-range quality.
    pub fn apply_preset_named(&mut self, preset: &str, quality: f32) -> Result<(), ConfigError> {
        let preset = preset.parse::<Preset>()?;
        self.apply_preset(preset, quality)
    }

    /// Check every parameter and mark the config as validated.
    ///
    /// Calling this on an already validated config is a no-op that succeeds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InconsistentParameters` if no preset has been
    /// applied, a parameter is out of range, or libwebp rejects the
    /// combination. The state is unchanged on error.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.state == ConfigState::Uninitialized {
            return Err(ConfigError::inconsistent(
                "preset",
                "a preset must be applied before validation",
            ));
        }

        self.check_bounds()?;
        self.to_libwebp()?;

        self.state = ConfigState::Validated;
        Ok(())
    }

    fn check_bounds(&self) -> Result<(), ConfigError> {
        check_quality(self.quality)?;
        check_range("method", self.method, 0, MAX_METHOD)?;
        check_range("sns_strength", self.sns_strength, 0, 100)?;
        check_range("filter_strength", self.filter_strength, 0, 100)?;
        check_range("filter_sharpness", self.filter_sharpness, 0, 7)?;
        check_range("preprocessing", self.preprocessing, 0, 7)?;
        check_range("segments", self.segments, 1, 4)?;
        check_range("pass", self.pass, 1, 10)?;
        check_range("alpha_quality", self.alpha_quality, 0, 100)?;
        check_range("near_lossless", self.near_lossless, 0, 100)?;

        if self.near_lossless < 100 && !self.lossless {
            return Err(ConfigError::inconsistent(
                "near_lossless",
                "near-lossless preprocessing requires lossless mode",
            ));
        }

        Ok(())
    }

    /// Build the libwebp configuration and let libwebp validate it.
    pub(crate) fn to_libwebp(&self) -> Result<WebPConfig, ConfigError> {
        let mut config = WebPConfig::new_with_preset(self.preset.to_libwebp(), self.quality)
            .map_err(|_| {
                ConfigError::inconsistent("preset", "libwebp refused to initialize the preset")
            })?;

        config.lossless = self.lossless as i32;
        config.method = self.method as i32;
        config.sns_strength = self.sns_strength as i32;
        config.filter_strength = self.filter_strength as i32;
        config.filter_sharpness = self.filter_sharpness as i32;
        config.preprocessing = self.preprocessing as i32;
        config.segments = self.segments as i32;
        config.pass = self.pass as i32;
        config.alpha_quality = self.alpha_quality as i32;
        config.near_lossless = self.near_lossless as i32;

        // SAFETY: `config` is a fully initialized WebPConfig that outlives the call.
        if unsafe { WebPValidateConfig(&config) } == 0 {
            return Err(ConfigError::inconsistent(
                "config",
                "rejected by libwebp validation",
            ));
        }

        Ok(config)
    }

    fn touch(&mut self) {
        if self.state == ConfigState::Validated {
            self.state = ConfigState::PresetApplied;
        }
    }

    /// Set the quality/speed trade-off (0 = fast, 6 = slower but smaller).
    pub fn set_method(&mut self, method: u8) {
        self.method = method;
        self.touch();
    }

    /// Enable or disable lossless compression.
    ///
    /// In lossless mode quality controls compression effort instead of
    /// fidelity.
    pub fn set_lossless(&mut self, lossless: bool) {
        self.lossless = lossless;
        self.touch();
    }

    /// Set spatial noise shaping strength (0-100).
    pub fn set_sns_strength(&mut self, strength: u8) {
        self.sns_strength = strength;
        self.touch();
    }

    /// Set loop filter strength (0-100, 0 = off).
    pub fn set_filter_strength(&mut self, strength: u8) {
        self.filter_strength = strength;
        self.touch();
    }

    /// Set loop filter sharpness (0-7, 0 = sharpest).
    pub fn set_filter_sharpness(&mut self, sharpness: u8) {
        self.filter_sharpness = sharpness;
        self.touch();
    }

    /// Set the number of segments (1-4).
    pub fn set_segments(&mut self, segments: u8) {
        self.segments = segments;
        self.touch();
    }

    /// Set the number of entropy analysis passes (1-10).
    pub fn set_pass(&mut self, pass: u8) {
        self.pass = pass;
        self.touch();
    }

    /// Set alpha plane quality (0-100).
    pub fn set_alpha_quality(&mut self, quality: u8) {
        self.alpha_quality = quality;
        self.touch();
    }

    /// Set near-lossless preprocessing (0 = strongest, 100 = off).
    pub fn set_near_lossless(&mut self, level: u8) {
        self.near_lossless = level;
        self.touch();
    }

    pub fn state(&self) -> ConfigState {
        self.state
    }

    pub fn is_validated(&self) -> bool {
        self.state == ConfigState::Validated
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    pub fn method(&self) -> u8 {
        self.method
    }

    pub fn is_lossless(&self) -> bool {
        self.lossless
    }

    pub fn sns_strength(&self) -> u8 {
        self.sns_strength
    }

    pub fn filter_strength(&self) -> u8 {
        self.filter_strength
    }

    pub fn filter_sharpness(&self) -> u8 {
        self.filter_sharpness
    }

    pub fn segments(&self) -> u8 {
        self.segments
    }
}

fn check_quality(quality: f32) -> Result<(), ConfigError> {
    if quality.is_finite() && (0.0..=100.0).contains(&quality) {
        Ok(())
    } else {
        Err(ConfigError::InvalidQuality(quality))
    }
}

fn check_range(parameter: &'static str, value: u8, min: u8, max: u8) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::inconsistent(
            parameter,
            format!("must be between {min} and {max}, got {value}"),
        ))
    }
}

fn to_u8(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn preset_strategy() -> impl Strategy<Value = Preset> {
        prop::sample::select(Preset::ALL.to_vec())
    }

    fn out_of_range_quality() -> impl Strategy<Value = f32> {
        prop_oneof![
            (100.0001f32..1.0e6),
            (-1.0e6f32..-0.0001),
            Just(f32::NAN),
            Just(f32::NEG_INFINITY),
        ]
    }

    proptest! {
        /// Property: every in-range quality is accepted by every preset and validates.
        #[test]
        fn prop_valid_quality_validates(
            preset in preset_strategy(),
            quality in 0.0f32..=100.0,
        ) {
            let config = EncodeConfig::build(preset, quality);
            prop_assert!(config.is_ok(), "quality {} rejected: {:?}", quality, config);
            prop_assert!(config.unwrap().is_validated());
        }

        /// Property: out-of-range quality fails and the prior state is kept.
        #[test]
        fn prop_invalid_quality_is_rejected(
            preset in preset_strategy(),
            prior in preset_strategy(),
            quality in out_of_range_quality(),
            validated in any::<bool>(),
        ) {
            let mut config = EncodeConfig::initialize();
            config.apply_preset(prior, 50.0).unwrap();
            if validated {
                config.validate().unwrap();
            }
            let before = config.clone();

            let result = config.apply_preset(preset, quality);
            prop_assert!(matches!(result, Err(ConfigError::InvalidQuality(_))));
            prop_assert_eq!(config, before);
        }

        /// Property: names outside the preset list are rejected.
        #[test]
        fn prop_unknown_preset_names_rejected(name in "[a-z]{1,12}") {
            prop_assume!(Preset::ALL.iter().all(|p| p.name() != name));

            let mut config = EncodeConfig::initialize();
            let result = config.apply_preset_named(&name, 75.0);
            prop_assert_eq!(result, Err(ConfigError::InvalidPreset(name.clone())));
            prop_assert_eq!(config.state(), ConfigState::Uninitialized);
        }

        /// Property: validate is idempotent.
        #[test]
        fn prop_validate_idempotent(
            preset in preset_strategy(),
            quality in 0.0f32..=100.0,
            method in 0u8..=MAX_METHOD,
        ) {
            let mut config = EncodeConfig::initialize();
            config.apply_preset(preset, quality).unwrap();
            config.set_method(method);
            config.validate().unwrap();
            let once = config.clone();

            prop_assert!(config.validate().is_ok());
            prop_assert_eq!(config, once);
        }

        /// Property: any out-of-range method is reported, never accepted.
        #[test]
        fn prop_method_out_of_range_rejected(method in (MAX_METHOD + 1)..=u8::MAX) {
            let mut config = EncodeConfig::initialize();
            config.apply_preset(Preset::Default, 75.0).unwrap();
            config.set_method(method);
            let result = config.validate();
            prop_assert!(
                matches!(
                    result,
                    Err(ConfigError::InconsistentParameters { parameter: "method", .. })
                ),
                "method {} gave {:?}",
                method,
                result
            );
        }
    }
}
