//! RGB colors as stored in game snapshots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An opaque RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

/// Which foreground variant reads best on a given background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    /// Light foreground, for dark backgrounds.
    White,
    /// Dark foreground, for light backgrounds.
    Gray,
}

impl Shade {
    /// Pick a variant from a darkness factor in `[0, 1]`.
    ///
    /// The boundary is inclusive: exactly `0.5` selects [`Shade::White`].
    #[must_use]
    pub fn from_darkness(darkness: f64) -> Self {
        if darkness < 0.5 {
            Self::Gray
        } else {
            Self::White
        }
    }

    /// CSS class suffix used by the icon classes (`white` / `gray`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Gray => "gray",
        }
    }
}

impl Color {
    /// Pure white.
    pub const WHITE: Self = Self(0x00ff_ffff);

    /// Build a color from its components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Red component.
    #[must_use]
    pub fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green component.
    #[must_use]
    pub fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue component.
    #[must_use]
    pub fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Perceived darkness: `1 - (0.299 R + 0.587 G + 0.114 B) / 255`.
    #[must_use]
    pub fn darkness(self) -> f64 {
        1.0 - (0.299 * f64::from(self.red())
            + 0.587 * f64::from(self.green())
            + 0.114 * f64::from(self.blue()))
            / 255.0
    }

    /// Foreground variant to draw on top of this color.
    #[must_use]
    pub fn shade(self) -> Shade {
        Shade::from_darkness(self.darkness())
    }

    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn to_html(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#rrggbb` or `#aarrggbb`; the alpha channel is dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) {
            return Err(Error::invalid_color(s));
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| Error::invalid_color(s))?;
        Ok(Self(value & 0x00ff_ffff))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let color: Color = "#1F2A3b".parse().unwrap();
        assert_eq!(color.red(), 0x1f);
        assert_eq!(color.green(), 0x2a);
        assert_eq!(color.blue(), 0x3b);
        assert_eq!(color.to_html(), "#1f2a3b");
    }

    #[test]
    fn test_parse_drops_alpha() {
        let color: Color = "#ff123456".parse().unwrap();
        assert_eq!(color, Color::from_rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("blue".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_shade_boundary_is_inclusive() {
        assert_eq!(Shade::from_darkness(0.5), Shade::White);
        assert_eq!(Shade::from_darkness(0.49), Shade::Gray);
    }

    #[test]
    fn test_shade_extremes() {
        assert_eq!(Color::from_rgb(0, 0, 0).shade(), Shade::White);
        assert_eq!(Color::WHITE.shade(), Shade::Gray);
        // Pure yellow is light despite full saturation
        assert_eq!(Color::from_rgb(255, 255, 0).shade(), Shade::Gray);
        assert_eq!(Color::from_rgb(0, 0, 255).shade(), Shade::White);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::from_rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::from_rgb(255, 0, 16));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
