//! Colours, hex parsing/formatting and the elevation colour ramp.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorParseError;

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse 1 to 6 hex digits as a 24-bit big-endian RGB value
    /// (`"ff8000"` → r=255, g=128, b=0). Alpha is always 255.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if s.len() > 6 {
            return Err(ColorParseError::TooLong(s.to_string()));
        }
        // from_str_radix tolerates a leading '+', which is not a hex digit.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }
        let v = u32::from_str_radix(s, 16)
            .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;
        Ok(Self::opaque((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }

    /// `#rrggbb`, lowercase. Alpha is not represented.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Serialized as the bare hex string used on the command line and in queries.
impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ── Elevation ramp ───────────────────────────────────────────────────────────

/// Linear interpolation of one channel, truncated to u8:
///   a·(1 − t) + b·t
#[inline]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 * (1.0 - t) + b as f64 * t) as u8
}

/// Two-stop colour gradient between the peak and valley colours.
///
/// `t = 0` yields `peak` exactly, `t = 1` yields `valley` exactly. Alpha is
/// always taken from `peak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRamp {
    pub peak: Rgba,
    pub valley: Rgba,
}

impl ColorRamp {
    pub fn new(peak: Rgba, valley: Rgba) -> Self {
        Self { peak, valley }
    }

    pub fn at(&self, t: f64) -> Rgba {
        Rgba {
            r: lerp_channel(self.peak.r, self.valley.r, t),
            g: lerp_channel(self.peak.g, self.valley.g, t),
            b: lerp_channel(self.peak.b, self.valley.b, t),
            a: self.peak.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_big_endian_rgb() {
        assert_eq!(Rgba::from_hex("ff8000").unwrap(), Rgba::opaque(255, 128, 0));
        assert_eq!(Rgba::from_hex("0000FF").unwrap(), Rgba::opaque(0, 0, 255));
    }

    #[test]
    fn short_values_fill_from_blue() {
        assert_eq!(Rgba::from_hex("f").unwrap(), Rgba::opaque(0, 0, 15));
        assert_eq!(Rgba::from_hex("1234").unwrap(), Rgba::opaque(0, 0x12, 0x34));
    }

    #[test]
    fn hex_round_trip() {
        let c = Rgba::from_hex("ff8000").unwrap();
        assert_eq!(c.to_hex(), "#ff8000");
        assert_eq!(c.to_string(), "#ff8000");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgba::from_hex(""), Err(ColorParseError::Empty));
        assert!(matches!(Rgba::from_hex("1234567"), Err(ColorParseError::TooLong(_))));
        assert!(matches!(Rgba::from_hex("12345g"), Err(ColorParseError::InvalidDigit(_))));
        assert!(matches!(Rgba::from_hex("+fff"), Err(ColorParseError::InvalidDigit(_))));
        assert!(matches!(Rgba::from_hex("#fff"), Err(ColorParseError::InvalidDigit(_))));
    }

    #[test]
    fn ramp_endpoints_are_exact() {
        let ramp = ColorRamp::new(Rgba::opaque(10, 200, 30), Rgba { r: 250, g: 0, b: 99, a: 7 });
        assert_eq!(ramp.at(0.0), Rgba::opaque(10, 200, 30));
        assert_eq!(ramp.at(1.0), Rgba { r: 250, g: 0, b: 99, a: 255 });
    }

    #[test]
    fn ramp_midpoint_truncates() {
        let ramp = ColorRamp::new(Rgba::opaque(0, 0, 255), Rgba::opaque(255, 0, 0));
        assert_eq!(ramp.at(0.5), Rgba::opaque(127, 0, 127));
    }

    #[test]
    fn serde_as_bare_hex() {
        let json = serde_json::to_string(&Rgba::opaque(255, 128, 0)).unwrap();
        assert_eq!(json, "\"ff8000\"");
        let c: Rgba = serde_json::from_str("\"00ff00\"").unwrap();
        assert_eq!(c, Rgba::opaque(0, 255, 0));
        assert!(serde_json::from_str::<Rgba>("\"zz\"").is_err());
    }
}
