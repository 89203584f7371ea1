//! Linear RGBA display colors for curve entries.
//!
//! Curve colors exist purely for display: the editing UI tints each curve's
//! keys and tree row with its entry color. Alpha is always stored fully
//! opaque so a curve can never become invisible through a stray alpha edit.

use serde::{Deserialize, Serialize};

/// Linear RGBA color, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// A random fully-saturated hue at full brightness, opaque.
    ///
    /// Matches what curve editors conventionally hand out for new entries:
    /// hues are easy to tell apart, while random per-channel values tend
    /// toward muddy grays.
    pub fn random() -> Self {
        use rand::Rng;
        let hue = rand::thread_rng().gen_range(0.0..360.0);
        Self::from_hue(hue)
    }

    /// Convert a hue in degrees (saturation and value pinned to 1.0) to RGB.
    fn from_hue(hue: f32) -> Self {
        let h = (hue.rem_euclid(360.0)) / 60.0;
        let x = 1.0 - (h % 2.0 - 1.0).abs();
        let (r, g, b) = match h as u32 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        Self { r, g, b, a: 1.0 }
    }

    /// This color with alpha forced to 1.0.
    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }
}
