// ABOUTME: Shared types and configuration for bsp-panels.
// ABOUTME: Defines colors, leaf swatches, layout metrics, and config file handling.

pub mod color;
pub mod config;

pub use color::{Color, Swatch};
pub use config::{Config, ConfigError, Metrics, Palette};
