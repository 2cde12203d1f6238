//! RGBA colors used by the keyframe tables.
//!
//! Channels are stored as `f32` in `[0, 1]`. Colors (de)serialize as CSS-style
//! hex strings (`#rgb`, `#rrggbb`, `#rrggbbaa`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::interp::functions::lerp_vec4_exact;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("color '{0}' must have 3, 6 or 8 hex digits")]
    BadLength(String),
    #[error("color '{0}' contains a non-hex digit")]
    BadDigit(String),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ])
    }

    /// Quantize back to 8-bit channels (rounded, clamped).
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.0[0]), q(self.0[1]), q(self.0[2]), q(self.0[3])]
    }

    /// Channel-wise linear blend. `t` may leave `[0, 1]`; the result is
    /// clamped back into the displayable range.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let mut c = lerp_vec4_exact(self.0, other.0, t);
        for ch in c.iter_mut() {
            *ch = ch.clamp(0.0, 1.0);
        }
        Rgba(c)
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let digits = raw
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(raw.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(raw.to_string()));
        }
        let channel = |i: usize, n: usize| {
            u8::from_str_radix(&digits[i..i + n], 16)
                .map_err(|_| ColorParseError::BadDigit(raw.to_string()))
        };
        match digits.len() {
            3 => Ok(Rgba::from_rgb8(
                channel(0, 1)? * 17,
                channel(1, 1)? * 17,
                channel(2, 1)? * 17,
            )),
            6 => Ok(Rgba::from_rgb8(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            8 => Ok(Rgba::from_rgba8(
                channel(0, 2)?,
                channel(2, 2)?,
                channel(4, 2)?,
                channel(6, 2)?,
            )),
            _ => Err(ColorParseError::BadLength(raw.to_string())),
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
