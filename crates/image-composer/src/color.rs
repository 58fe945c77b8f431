//! Validated color and opacity values.

use std::fmt;
use std::str::FromStr;

use image::Rgba;

use crate::{ComposerError, Result};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The color as a fully opaque RGBA pixel.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl FromStr for Rgb {
    type Err = ComposerError;

    /// Parse `"R,G,B"`. Exactly three components, each an integer in 0-255.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ComposerError::InvalidColorFormat(s.to_string());

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.trim().parse::<u8>().map_err(|_| invalid())?;
        }

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// A blend factor in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Opacity(f32);

impl Opacity {
    pub const OPAQUE: Opacity = Opacity(1.0);

    pub fn new(value: f32) -> Result<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ComposerError::InvalidOpacity(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_opaque(self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::OPAQUE
    }
}
