//! RGB color value shared by the color policy and the SVG writer.

use std::fmt;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() { bail!("[color] Invalid hex color {s:?}") }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_owned(),
            _ => bail!("[color] Expected #rgb or #rrggbb, got {s:?}"),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .with_context(|| format!("[color] Invalid hex color {s:?}"))
        };

        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}
