//! RGBA colour values and their two string forms.
//!
//! A [`Colour`] has two textual representations:
//!
//! - **Wire format**: `rgba(R,G,B,A)`, all four channels integers 0–255 with
//!   no spaces. Used in colour-scheme JSON. An absent colour is written as
//!   the literal `nil`.
//! - **CSS format**: `rgba(R, G, B, a)` where `a` is the alpha channel as a
//!   fraction of 255 with at most two decimals. Used when binding colours into
//!   stylesheet templates.
//!
//! # Example
//!
//! ```rust
//! use syscolour::Colour;
//!
//! let accent: Colour = "rgba(0,122,255,255)".parse().unwrap();
//! assert_eq!(accent.to_wire(), "rgba(0,122,255,255)");
//! assert_eq!(accent.to_css(), "rgba(0, 122, 255, 1)");
//!
//! // Lenient decoding never fails, it just yields nothing
//! assert_eq!(Colour::parse_wire("nil"), None);
//! assert_eq!(Colour::parse_wire("#007aff"), None);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColourParseError;

/// Wire-format spelling of an absent colour.
pub const NIL: &str = "nil";

/// An 8-bit-per-channel RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Colour {
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// An opaque colour.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    /// An opaque colour from `0xRRGGBB`. Bits above the low 24 are ignored.
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    /// Decodes a wire-format value, yielding `None` for `nil` and for anything
    /// malformed.
    pub fn parse_wire(value: &str) -> Option<Self> {
        if value == NIL {
            return None;
        }
        value.parse().ok()
    }

    /// Encodes as `rgba(R,G,B,A)`.
    pub fn to_wire(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            self.red, self.green, self.blue, self.alpha
        )
    }

    /// Encodes as `rgba(R, G, B, a)` with a fractional alpha.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.red,
            self.green,
            self.blue,
            alpha_fraction(self.alpha)
        )
    }
}

/// `alpha / 255` to at most two decimals, without trailing zeros.
fn alpha_fraction(alpha: u8) -> String {
    let fixed = format!("{:.2}", f64::from(alpha) / 255.0);
    match fixed.trim_end_matches('0').trim_end_matches('.') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

impl FromStr for Colour {
    type Err = ColourParseError;

    /// Strict wire-format parse. `nil` is an error here; use
    /// [`Colour::parse_wire`] for the lenient form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .trim()
            .strip_prefix("rgba")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ColourParseError::NotRgba(s.to_string()))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ColourParseError::ComponentCount(parts.len()));
        }

        let mut channels = [0u8; 4];
        for (channel, part) in channels.iter_mut().zip(&parts) {
            *channel = part
                .parse()
                .map_err(|_| ColourParseError::InvalidChannel(part.to_string()))?;
        }

        let [red, green, blue, alpha] = channels;
        Ok(Self::rgba(red, green, blue, alpha))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
