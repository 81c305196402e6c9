// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color model: hex, RGB and HSL representations of a single sRGB color.
//!
//! Canonical storage is an 8-bit RGB triple, so every `Color` is valid by
//! construction. Hex input accepts `#rgb` and `#rrggbb` (the `#` is optional,
//! case-insensitive); hex output is always lowercase `#rrggbb`.

use crate::error::{ContrastError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An immutable 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as a tuple
    pub fn channels(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Normalized `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Build a color from HSL.
    ///
    /// Hue is taken modulo 360. Saturation and lightness are clamped to
    /// [0, 1] before conversion, so out-of-range input saturates instead of
    /// producing wrapped channel values.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = to_channel(l);
            return Self::rgb(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::rgb(
            to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_rgb(p, q, h)),
            to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }

    /// Convert to HSL: hue in [0, 360), saturation and lightness in [0, 1]
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        ((h * 60.0).rem_euclid(360.0), s, l)
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Parse a hex color (`#rgb`, `#rrggbb`, `#` optional, any case)
pub fn parse_hex(input: &str) -> Result<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let invalid = || ContrastError::InvalidColorFormat {
        input: input.to_string(),
    };

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Normalized `#rrggbb` form of a color
pub fn to_hex(color: Color) -> String {
    color.to_hex()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ContrastError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_six_digits() {
        assert_eq!(parse_hex("#ff0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(parse_hex("3B82F6").unwrap(), Color::rgb(0x3b, 0x82, 0xf6));
    }

    #[test]
    fn test_parse_hex_shorthand_expands() {
        assert_eq!(parse_hex("#abc").unwrap().to_hex(), "#aabbcc");
        assert_eq!(parse_hex("fff").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        for bad in ["", "#", "#12", "#1234", "#12345g", "blue", "#ff00ff00", "#ééé"] {
            match parse_hex(bad) {
                Err(ContrastError::InvalidColorFormat { input }) => assert_eq!(input, bad),
                other => panic!("expected InvalidColorFormat for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_to_hex_is_lowercase() {
        assert_eq!(Color::rgb(0xAB, 0xCD, 0xEF).to_hex(), "#abcdef");
        assert_eq!(to_hex(Color::BLACK), "#000000");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsl(120.0, 1.0, 0.5), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsl(240.0, 1.0, 0.5), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hsl(600.0, 1.0, 0.5), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hsl(-120.0, 1.0, 0.5), Color::rgb(0, 0, 255));
    }

    #[test]
    fn test_hsl_grey_has_no_saturation() {
        let (h, s, l) = Color::rgb(128, 128, 128).to_hsl();
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_hsl_clamps_out_of_range() {
        assert_eq!(Color::from_hsl(0.0, 0.0, 1.7), Color::WHITE);
        assert_eq!(Color::from_hsl(0.0, 0.5, -0.2), Color::BLACK);
        assert_eq!(Color::from_hsl(0.0, 4.0, 0.5), Color::from_hsl(0.0, 1.0, 0.5));
    }

    #[test]
    fn test_hsl_round_trip() {
        for hex in ["#3b82f6", "#767676", "#10b981", "#f59e0b", "#000000", "#ffffff"] {
            let c = parse_hex(hex).unwrap();
            let (h, s, l) = c.to_hsl();
            let back = Color::from_hsl(h, s, l);
            assert!((i16::from(back.r) - i16::from(c.r)).abs() <= 1, "{}", hex);
            assert!((i16::from(back.g) - i16::from(c.g)).abs() <= 1, "{}", hex);
            assert!((i16::from(back.b) - i16::from(c.b)).abs() <= 1, "{}", hex);
        }
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: Color = serde_json::from_str("\"#F00\"").unwrap();
        assert_eq!(back, Color::rgb(255, 0, 0));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
