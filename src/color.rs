use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("Empty color value")]
    Empty,
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

/// Opaque 24-bit RGB color, displayed as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Bytes in the order the `pixels` frame buffer expects.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "red" => Color::rgb(255, 0, 0),
            "blue" => Color::rgb(0, 0, 255),
            "green" => Color::rgb(0, 128, 0),
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "pink" => Color::rgb(255, 192, 203),
            "cyan" => Color::rgb(0, 255, 255),
            "magenta" => Color::rgb(255, 0, 255),
            "white" => Color::WHITE,
            "black" => Color::BLACK,
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "brown" => Color::rgb(165, 42, 42),
            "lime" => Color::rgb(0, 255, 0),
            _ => return None,
        };
        Some(color)
    }

    fn from_hex_digits(digits: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(format!("#{}", digits));

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                // #rgb expands each nibble: #0a7 -> #00aa77
                let mut channels = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let nibble = c.to_digit(16).ok_or_else(invalid)? as u8;
                    channels[i] = nibble * 17;
                }
                Ok(Color::rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let channel = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
                };
                Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ColorError::Empty);
        }

        if let Some(digits) = value.strip_prefix('#') {
            return Self::from_hex_digits(digits);
        }

        let lowered = value.to_lowercase();
        Self::from_name(&lowered).ok_or(ColorError::UnknownName(value.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_hex() {
        let color: Color = "#009578".parse().unwrap();
        assert_eq!(color, Color::rgb(0x00, 0x95, 0x78));
        assert_eq!(color.to_hex(), "#009578");
    }

    #[test]
    fn parses_short_hex_and_uppercase() {
        assert_eq!("#FFF".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#0a7".parse::<Color>().unwrap(), Color::rgb(0x00, 0xaa, 0x77));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(" Black ".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("grey".parse::<Color>().unwrap(), Color::rgb(128, 128, 128));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<Color>(), Err(ColorError::Empty));
        assert!(matches!("#12345".parse::<Color>(), Err(ColorError::InvalidHex(_))));
        assert!(matches!("#gg0000".parse::<Color>(), Err(ColorError::InvalidHex(_))));
        assert!(matches!("teal-ish".parse::<Color>(), Err(ColorError::UnknownName(_))));
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102ff\"");
        let back: Color = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(back, Color::rgb(255, 0, 0));
    }
}
