//! RGBA color type and predefined color constants.

use crate::error::DrawError;
use std::fmt;

/// Represents an RGBA color with 8-bit channels.
///
/// Channels are stored exactly as they are persisted (`#AARRGGBB`), so a color
/// survives a save/load cycle unchanged.
///
/// # Examples
///
/// ```
/// use vectorpad::draw::Color;
/// let red = Color::rgb(255, 0, 0);
/// assert_eq!(red.to_hex(), "#FFFF0000");
/// let glass = Color::from_hex("#80FFFFFF").unwrap();
/// assert_eq!(glass.a, 0x80);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
    /// Alpha/transparency (0 = fully transparent, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Formats the color as an 8-hex-digit `#AARRGGBB` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }

    /// Parses `#AARRGGBB`, or `#RRGGBB` (treated as opaque).
    pub fn from_hex(hex: &str) -> Result<Self, DrawError> {
        let invalid = || DrawError::InvalidAttribute(format!("invalid color '{hex}'"));
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        match digits.len() {
            8 => Ok(Self {
                a: channel(0)?,
                r: channel(2)?,
                g: channel(4)?,
                b: channel(6)?,
            }),
            6 => Ok(Self {
                a: 255,
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
            }),
            _ => Err(invalid()),
        }
    }

    /// Returns true if the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

pub const RED: Color = Color::rgb(255, 0, 0);

pub const GREEN: Color = Color::rgb(0, 255, 0);

pub const BLUE: Color = Color::rgb(0, 0, 255);

pub const YELLOW: Color = Color::rgb(255, 255, 0);

pub const ORANGE: Color = Color::rgb(255, 128, 0);

pub const PINK: Color = Color::rgb(255, 0, 255);

pub const WHITE: Color = Color::rgb(255, 255, 255);

pub const BLACK: Color = Color::rgb(0, 0, 0);

/// Fully transparent color, the "no fill" value.
pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

/// Stroke color of a freshly created shape.
pub const DEFAULT_STROKE: Color = BLACK;

/// Fill color of a freshly created shape (transparent white).
pub const DEFAULT_FILL: Color = Color::new(255, 255, 255, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_uses_alpha_first_layout() {
        assert_eq!(RED.to_hex(), "#FFFF0000");
        assert_eq!(DEFAULT_FILL.to_hex(), "#00FFFFFF");
        assert_eq!(Color::new(1, 2, 3, 4).to_hex(), "#04010203");
    }

    #[test]
    fn from_hex_accepts_short_and_long_forms() {
        assert_eq!(Color::from_hex("#FF00FF00").unwrap(), GREEN);
        assert_eq!(Color::from_hex("#0000ff").unwrap(), BLUE);
        assert_eq!(Color::from_hex("#7f102030").unwrap(), Color::new(0x10, 0x20, 0x30, 0x7f));
    }

    #[test]
    fn from_hex_rejects_garbage() {
        for bad in ["", "FF000000", "#FFF", "#GG000000", "#FF0000000", "#ÿÿÿÿ"] {
            assert!(
                matches!(Color::from_hex(bad), Err(DrawError::InvalidAttribute(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
