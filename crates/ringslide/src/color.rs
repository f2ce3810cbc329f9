use derive_more::{Deref, From, Into};
use palette::{Srgb, Srgba};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An 8-bit sRGB color, written as `#rgb`, `#rrggbb` or `#rrggbbaa` in
/// config files.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgba<u8>);

impl Color {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgba::new(red, green, blue, u8::MAX))
    }

    pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Components scaled to `0.0..=1.0`, the form cairo-style renderers take.
    pub fn to_unit(self) -> Srgba<f64> {
        let scale = |c: u8| f64::from(c) / f64::from(u8::MAX);
        Srgba::new(
            scale(self.0.red),
            scale(self.0.green),
            scale(self.0.blue),
            scale(self.0.alpha),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("expected #rgb, #rrggbb or #rrggbbaa, got '{0}'")]
    Length(String),
    #[error("invalid hex digits in '{0}'")]
    Digits(String),
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 3 | 6 | 8) || !hex.is_ascii() {
            return Err(ParseColorError::Length(s.to_owned()));
        }

        let (rgb, alpha) = match hex.len() {
            8 => {
                let (rgb, alpha) = hex.split_at(6);
                (rgb, Some(alpha))
            }
            _ => (hex, None),
        };

        let rgb: Srgb<u8> = rgb
            .parse()
            .map_err(|_| ParseColorError::Digits(s.to_owned()))?;
        let alpha = match alpha {
            Some(alpha) if alpha.bytes().all(|b| b.is_ascii_hexdigit()) => {
                u8::from_str_radix(alpha, 16)
                    .map_err(|_| ParseColorError::Digits(s.to_owned()))?
            }
            Some(_) => return Err(ParseColorError::Digits(s.to_owned())),
            None => u8::MAX,
        };

        Ok(Self::rgba(rgb.red, rgb.green, rgb.blue, alpha))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)?;
        if c.alpha != u8::MAX {
            write!(f, "{:02x}", c.alpha)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        let cases = vec![
            ("#ff0000", Color::rgb(255, 0, 0)),
            ("ffff00", Color::rgb(255, 255, 0)),
            ("#FFFF00", Color::rgb(255, 255, 0)),
            ("#00000080", Color::rgba(0, 0, 0, 128)),
            ("#fff", Color::rgb(255, 255, 255)),
            ("0a8", Color::rgb(0x00, 0xaa, 0x88)),
        ];

        for (s, expected) in cases {
            assert_eq!(s.parse::<Color>().unwrap(), expected);
        }
    }

    #[test]
    fn test_color_rejects_garbage() {
        for s in ["#ffff", "#fffffff", "", "#é0000"] {
            assert!(
                matches!(s.parse::<Color>(), Err(ParseColorError::Length(_))),
                "{s}"
            );
        }
        for s in ["#gg0000", "#xyz", "#000000zz", "#000000+1"] {
            assert!(
                matches!(s.parse::<Color>(), Err(ParseColorError::Digits(_))),
                "{s}"
            );
        }
    }

    #[test]
    fn test_color_serde() {
        let color: Color = serde_json::from_str("\"#3f51b5\"").unwrap();
        assert_eq!(color, Color::rgb(0x3f, 0x51, 0xb5));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#3f51b5\"");

        let translucent = Color::rgba(1, 2, 3, 4);
        assert_eq!(translucent.to_string(), "#01020304");
    }

    #[test]
    fn test_color_to_unit() {
        let unit = Color::rgba(255, 0, 255, 0).to_unit();
        assert_eq!(unit.red, 1.0);
        assert_eq!(unit.green, 0.0);
        assert_eq!(unit.blue, 1.0);
        assert_eq!(unit.alpha, 0.0);
    }
}
