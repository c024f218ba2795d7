//! Terrain: the per-cell height function evaluated every frame.
//!
//! Rows (`y`) run into the distance. Time scrolls the terrain towards the
//! viewer in whole-row steps, and a fractional z offset covers the motion
//! between steps.
//!
//! # Invariants
//! - Sampling is a pure function of `(x, y, t, grid_width, grid_height)`.
//! - A row's terrain phase is `y - terrain_offset(t)`; everything except the
//!   world z and depth depends on the phase, never on `y` or `t` alone.

mod config;
mod height;

pub use config::TerrainConfig;
pub use height::{Terrain, TerrainSample, scroll_fraction, terrain_offset};

pub fn crate_info() -> &'static str {
    "roadscape-terrain v0.1.0"
}
