// ABOUTME: GPU rendering of partition panels.
// ABOUTME: Uses wgpu to draw leaf fills, control buttons, and dividers as solid quads.

mod glyphs;
mod gpu;
mod quad_pipeline;
pub mod renderer;
mod scene;

pub use renderer::{RenderError, Renderer};
