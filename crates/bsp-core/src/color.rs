// ABOUTME: Color representation and the display tags carried by leaf panels.
// ABOUTME: Swatches are resolved to concrete colors through the configured palette.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels (e.g. `0xe9, 0xd5, 0xff`)
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Display tag for a leaf panel.
///
/// Leaves created by a horizontal split get the blue pair, leaves created by a
/// vertical split the green pair. A leaf without a swatch is drawn gray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Swatch {
    #[serde(rename = "purple-200")]
    Purple200,
    #[serde(rename = "blue-100")]
    Blue100,
    #[serde(rename = "blue-200")]
    Blue200,
    #[serde(rename = "green-100")]
    Green100,
    #[serde(rename = "green-200")]
    Green200,
    #[serde(rename = "gray-200")]
    Gray200,
}
