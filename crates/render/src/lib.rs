//! Rendering: perspective projection, quad culling and painter's-order
//! rasterization of the terrain grid onto an immediate-mode 2D surface.
//!
//! # Invariants
//! - A frame is a pure function of its time value; no internal clock.
//! - The grid is written once per frame, then only read while drawing.
//! - Rows are drawn far to near. There is no depth buffer; ordering relies on
//!   grid row order matching view depth.
//! - Non-finite geometry never reaches a surface.

mod config;
mod cull;
mod projector;
mod renderer;
mod surface;
mod svg;

pub use config::{ConfigLoadError, GridBounds, Palette, ProjectionConfig, SceneConfig};
pub use cull::{Quad, Visibility};
pub use projector::Projector;
pub use renderer::{COMPONENTS, FrameStats, TerrainRenderer, fade_alpha};
pub use surface::{Color, DrawCall, GradientStop, RecordingSurface, Rect, Surface};
pub use svg::SvgSurface;

pub fn crate_info() -> &'static str {
    "roadscape-render v0.1.0"
}
