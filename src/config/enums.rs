//! Configuration enum types.

use crate::draw::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// stroke_color = "red"
///
/// # Hex color with alpha (#AARRGGBB) or without (#RRGGBB)
/// fill_color = "#800000FF"
///
/// # Custom RGB color (0-255 per component)
/// stroke_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, white, black,
    /// transparent) or a `#AARRGGBB` / `#RRGGBB` hex string
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`], or `None` when the
    /// name or hex string is not recognised.
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::rgb(*r, *g, *b)),
        }
    }
}

/// Compression setting for drawing files.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageCompression {
    /// Always write plain JSON
    #[default]
    Off,
    /// Always gzip
    On,
    /// Gzip once the payload passes `auto_compress_threshold_kb`
    Auto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{ORANGE, TRANSPARENT};

    #[test]
    fn color_spec_accepts_names_hex_and_rgb() {
        assert_eq!(ColorSpec::Name("orange".into()).to_color(), Some(ORANGE));
        assert_eq!(ColorSpec::Name("none".into()).to_color(), Some(TRANSPARENT));
        assert_eq!(
            ColorSpec::Name("#80FF0000".into()).to_color(),
            Some(Color::new(255, 0, 0, 128))
        );
        assert_eq!(
            ColorSpec::Rgb([255, 128, 0]).to_color(),
            Some(Color::rgb(255, 128, 0))
        );
        assert_eq!(ColorSpec::Name("mauve".into()).to_color(), None);
    }
}
