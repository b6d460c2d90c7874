// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Color, Swatch};

/// Colors used to draw the partition surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub purple_200: Color,
    pub blue_100: Color,
    pub blue_200: Color,
    pub green_100: Color,
    pub green_200: Color,
    pub gray_200: Color,
    /// Divider bar at rest
    pub divider: Color,
    /// Divider bar under the pointer or being dragged
    pub divider_active: Color,
    pub split_horizontal_button: Color,
    pub split_vertical_button: Color,
    pub delete_button: Color,
    /// Stroke color for the button labels
    pub glyph: Color,
}

impl Palette {
    /// Resolve a leaf's swatch; leaves without one are drawn gray
    pub fn swatch(&self, swatch: Option<Swatch>) -> Color {
        match swatch.unwrap_or(Swatch::Gray200) {
            Swatch::Purple200 => self.purple_200,
            Swatch::Blue100 => self.blue_100,
            Swatch::Blue200 => self.blue_200,
            Swatch::Green100 => self.green_100,
            Swatch::Green200 => self.green_200,
            Swatch::Gray200 => self.gray_200,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb8(0x11, 0x18, 0x27),
            purple_200: Color::rgb8(0xe9, 0xd5, 0xff),
            blue_100: Color::rgb8(0xdb, 0xea, 0xfe),
            blue_200: Color::rgb8(0xbf, 0xdb, 0xfe),
            green_100: Color::rgb8(0xdc, 0xfc, 0xe7),
            green_200: Color::rgb8(0xbb, 0xf7, 0xd0),
            gray_200: Color::rgb8(0xe5, 0xe7, 0xeb),
            divider: Color::rgb8(0x9c, 0xa3, 0xaf),
            divider_active: Color::rgb8(0x4b, 0x55, 0x63),
            split_horizontal_button: Color::rgb8(0x3b, 0x82, 0xf6),
            split_vertical_button: Color::rgb8(0x22, 0xc5, 0x5e),
            delete_button: Color::rgb8(0xef, 0x44, 0x44),
            glyph: Color::WHITE,
        }
    }
}

/// Pixel sizes for dividers and leaf controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Visible thickness of a divider bar
    pub divider_thickness: f32,
    /// Extra grab margin on each side of a divider
    pub divider_hit_padding: f32,
    /// Side length of a leaf control button
    pub button_size: f32,
    /// Space between neighbouring leaf control buttons
    pub button_gap: f32,
}

impl Metrics {
    /// Convert logical sizes to physical pixels for a display scale factor
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            divider_thickness: self.divider_thickness * factor,
            divider_hit_padding: self.divider_hit_padding * factor,
            button_size: self.button_size * factor,
            button_gap: self.button_gap * factor,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            divider_thickness: 4.0,
            divider_hit_padding: 3.0,
            button_size: 28.0,
            button_gap: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout sizes
    pub metrics: Metrics,

    /// Colors
    pub palette: Palette,

    /// Window dimensions
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metrics: Metrics::default(),
            palette: Palette::default(),
            window_width: 1200,
            window_height: 800,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// Get the default config file path (~/.config/bsp-panels/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bsp-panels").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML text; missing keys take their defaults
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from the default path, or the defaults when no file exists
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Save config to a path, creating its directory first
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save config to the default path and return where it was written
    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)?;
        Ok(path)
    }
}
