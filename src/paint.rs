//! Colors and gradient rules.

use std::fmt;
use std::str::FromStr;

use palette::{Mix, Srgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Rgba8
// ============================================================================

/// An sRGB color with straight (non-premultiplied) 8-bit alpha.
///
/// Serializes as a hex string: `"#rrggbb"` or `"#rrggbbaa"`. Parsing also
/// accepts the short `"#rgb"` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Adds `delta` to each color channel, saturating at 255.
    pub fn brighten(self, delta: u8) -> Self {
        Self {
            r: self.r.saturating_add(delta),
            g: self.g.saturating_add(delta),
            b: self.b.saturating_add(delta),
            a: self.a,
        }
    }

    /// Linear per-channel interpolation; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mixed = self.to_srgb().mix(other.to_srgb(), t);
        let alpha = self.a as f32 + (other.a as f32 - self.a as f32) * t;
        Self::from_srgb(mixed, alpha.round() as u8)
    }

    fn to_srgb(self) -> Srgb {
        Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    fn from_srgb(rgb: Srgb, a: u8) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(channel(rgb.red), channel(rgb.green), channel(rgb.blue), a)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ParseColorError(String);

impl FromStr for Rgba8 {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(err)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let (rgb, alpha) = match digits.len() {
            3 | 6 => (digits, 255),
            8 => {
                let (rgb, aa) = digits.split_at(6);
                (rgb, u8::from_str_radix(aa, 16).map_err(|_| err())?)
            }
            _ => return Err(err()),
        };
        let color = Srgb::<u8>::from_str(rgb).map_err(|_| err())?;
        Ok(Self::rgba(color.red, color.green, color.blue, alpha))
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba8> for String {
    fn from(color: Rgba8) -> Self {
        color.to_string()
    }
}

// ============================================================================
// Gradient
// ============================================================================

/// Axis along which a [`Gradient`] interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientAxis {
    /// `t = y / side`, top to bottom.
    Vertical,
    /// `t` = distance from the canvas center over the center-to-corner distance.
    Radial,
}

/// A two-color gradient rule.
///
/// `t = 0` yields `start`, `t = 1` yields `end`; values in between move
/// monotonically from one to the other with no wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub start: Rgba8,
    pub end: Rgba8,
    pub axis: GradientAxis,
}

impl Gradient {
    pub fn vertical(start: Rgba8, end: Rgba8) -> Self {
        Self {
            start,
            end,
            axis: GradientAxis::Vertical,
        }
    }

    pub fn radial(start: Rgba8, end: Rgba8) -> Self {
        Self {
            start,
            end,
            axis: GradientAxis::Radial,
        }
    }

    /// Color at interpolation parameter `t` (clamped to `[0, 1]`).
    pub fn at(&self, t: f32) -> Rgba8 {
        self.start.lerp(self.end, t)
    }

    /// Interpolation parameter for pixel `(x, y)` on a canvas of `side` pixels.
    pub fn param(&self, x: u32, y: u32, side: u32) -> f32 {
        let side = side.max(1) as f32;
        match self.axis {
            GradientAxis::Vertical => y as f32 / side,
            GradientAxis::Radial => {
                let half = side / 2.0;
                let dx = x as f32 + 0.5 - half;
                let dy = y as f32 + 0.5 - half;
                (dx * dx + dy * dy).sqrt() / (std::f32::consts::SQRT_2 * half)
            }
        }
    }

    /// Color of pixel `(x, y)` on a canvas of `side` pixels.
    pub fn sample(&self, x: u32, y: u32, side: u32) -> Rgba8 {
        self.at(self.param(x, y, side))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let color: Rgba8 = "#8a2be2".parse().unwrap();
        assert_eq!(color, Rgba8::hex(0x8a2be2));
        assert_eq!(color.to_string(), "#8a2be2");

        let translucent: Rgba8 = "#00000064".parse().unwrap();
        assert_eq!(translucent, Rgba8::rgba(0, 0, 0, 100));
        assert_eq!(translucent.to_string(), "#00000064");

        let short: Rgba8 = "#fa0".parse().unwrap();
        assert_eq!(short, Rgba8::rgb(0xff, 0xaa, 0x00));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!("8a2be2".parse::<Rgba8>().is_err());
        assert!("#8a2be".parse::<Rgba8>().is_err());
        assert!("#zzzzzz".parse::<Rgba8>().is_err());
        assert!("#+a2be2".parse::<Rgba8>().is_err());
        assert!("#8a2be2f".parse::<Rgba8>().is_err());
    }

    #[test]
    fn lerp_hits_endpoints() {
        let a = Rgba8::rgb(26, 0, 51);
        let b = Rgba8::rgb(13, 0, 26);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 2.0), b, "t is clamped");
    }

    #[test]
    fn gradient_is_monotonic() {
        let g = Gradient::vertical(Rgba8::BLACK, Rgba8::WHITE);
        let mut last = 0;
        for y in 0..64 {
            let c = g.sample(0, y, 64);
            assert!(c.r >= last, "red channel must not decrease");
            last = c.r;
        }
    }

    #[test]
    fn radial_param_spans_center_to_corner() {
        let g = Gradient::radial(Rgba8::WHITE, Rgba8::BLACK);
        assert!(g.param(32, 32, 64) < 0.02);
        assert!(g.param(0, 0, 64) > 0.95);
        assert!(g.param(0, 0, 64) <= 1.0);
    }

    #[test]
    fn brighten_saturates() {
        let c = Rgba8::rgb(138, 43, 226).brighten(60);
        assert_eq!(c, Rgba8::rgb(198, 103, 255));
    }
}
