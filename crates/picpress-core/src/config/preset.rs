//! Content-category presets.

use std::fmt;
use std::str::FromStr;

use libwebp_sys::WebPPreset;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Named bundle of encoder tuning defaults keyed to a content category.
///
/// Applying a preset sets spatial noise shaping, loop filter strength and
/// sharpness, preprocessing and segment count to values libwebp tuned for
/// that kind of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Balanced for general use.
    #[default]
    Default,
    /// Outdoor photograph with natural lighting.
    Photo,
    /// Digital picture, like portrait or indoor shot.
    Picture,
    /// Hand or line drawing with high-contrast details.
    Drawing,
    /// Small-sized colorful images.
    Icon,
    /// Text-like content.
    Text,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Default,
        Preset::Photo,
        Preset::Picture,
        Preset::Drawing,
        Preset::Icon,
        Preset::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Photo => "photo",
            Preset::Picture => "picture",
            Preset::Drawing => "drawing",
            Preset::Icon => "icon",
            Preset::Text => "text",
        }
    }

    pub(crate) fn to_libwebp(self) -> WebPPreset {
        match self {
            Preset::Default => WebPPreset::WEBP_PRESET_DEFAULT,
            Preset::Photo => WebPPreset::WEBP_PRESET_PHOTO,
            Preset::Picture => WebPPreset::WEBP_PRESET_PICTURE,
            Preset::Drawing => WebPPreset::WEBP_PRESET_DRAWING,
            Preset::Icon => WebPPreset::WEBP_PRESET_ICON,
            Preset::Text => WebPPreset::WEBP_PRESET_TEXT,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| ConfigError::InvalidPreset(s.to_string()))
    }
}
