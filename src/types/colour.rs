//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use palette::{Hsv, IntoColor, Srgb};

use crate::error::{PxTileError, Result};

/// BT.601 luma weights used for every luminance computation.
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 | 4 => {
                let mut nibbles = [0xFu8; 4];
                for (slot, c) in nibbles.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b, a] = nibbles.map(|n| n << 4 | n);
                Ok(Self::new(r, g, b, a))
            }
            6 | 8 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    parse_hex_byte(&hex[6..8])?
                } else {
                    255
                };
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The RGB channels only.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Replace the RGB channels, keeping alpha.
    pub fn with_rgb(self, rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], self.a)
    }

    /// Perceptual luminance (BT.601 weights), 0.0..=255.0.
    pub fn luminance(self) -> f64 {
        luminance(self.to_rgb())
    }

    /// Collapse near-duplicates by masking the low 3 bits of each RGB channel.
    pub fn quantized(self) -> Self {
        self.with_rgb(quantize_rgb(self.to_rgb()))
    }

    /// Convert to HSV: hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let rgb: Srgb<f64> = Srgb::new(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        );
        let hsv: Hsv<palette::encoding::Srgb, f64> = rgb.into_color();
        (hsv.hue.into_positive_degrees(), hsv.saturation, hsv.value)
    }

    /// Build a colour from HSV components. Channels are truncated, not rounded.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64, alpha: u8) -> Self {
        let hsv: Hsv<palette::encoding::Srgb, f64> = Hsv::new(hue, saturation, value);
        let rgb: Srgb<f64> = hsv.into_color();
        Self::new(
            unit_to_byte(rgb.red),
            unit_to_byte(rgb.green),
            unit_to_byte(rgb.blue),
            alpha,
        )
    }

    /// Shift hue (degrees, wrapping) and offset saturation/value (clamped).
    pub fn shift_hsv(self, hue_shift: f64, saturation_delta: f64, value_delta: f64) -> Self {
        let (h, s, v) = self.to_hsv();
        Self::from_hsv(
            (h + hue_shift).rem_euclid(360.0),
            (s + saturation_delta).clamp(0.0, 1.0),
            (v + value_delta).clamp(0.0, 1.0),
            self.a,
        )
    }
}

impl FromStr for Colour {
    type Err = PxTileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Luminance of an RGB triple.
pub fn luminance(rgb: [u8; 3]) -> f64 {
    LUMA_WEIGHTS[0] * rgb[0] as f64 + LUMA_WEIGHTS[1] * rgb[1] as f64 + LUMA_WEIGHTS[2] * rgb[2] as f64
}

/// 5-bit-per-channel quantization.
pub fn quantize_rgb(rgb: [u8; 3]) -> [u8; 3] {
    rgb.map(|c| c & !0x07)
}

/// Sum of absolute channel differences.
pub fn manhattan(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as i32 - y as i32).unsigned_abs())
        .sum()
}

/// Squared Euclidean RGB distance.
pub fn distance_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn unit_to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

fn invalid_hex(s: &str) -> PxTileError {
    PxTileError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PxTileError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PxTileError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
