//! Validated text colors.
//!
//! Colors are stored and persisted as lowercase hex strings (`#rrggbb` or
//! `#rrggbbaa`), the same form a color picker hands back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextColor {
    pub const BLACK: TextColor = TextColor::rgb(0, 0, 0);
    pub const WHITE: TextColor = TextColor::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn parse_hex(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidColor(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Ok(Self::rgba(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_skia(&self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for TextColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for TextColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TextColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(
            TextColor::parse_hex("#ff8000").unwrap(),
            TextColor::rgb(255, 128, 0)
        );
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(TextColor::parse_hex("#fff").unwrap(), TextColor::WHITE);
    }

    #[test]
    fn test_parse_with_alpha() {
        let color = TextColor::parse_hex("00000080").unwrap();
        assert_eq!(color.a, 0x80);
        assert_eq!(color.to_hex(), "#00000080");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(TextColor::parse_hex("").is_err());
        assert!(TextColor::parse_hex("#12345").is_err());
        assert!(TextColor::parse_hex("#gg0000").is_err());
        assert!(TextColor::parse_hex("red").is_err());
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let json = serde_json::to_string(&TextColor::rgb(0x66, 0x7e, 0xea)).unwrap();
        assert_eq!(json, "\"#667eea\"");
        let parsed: TextColor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TextColor::rgb(0x66, 0x7e, 0xea));
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<TextColor>("\"#zz\"").is_err());
    }
}
