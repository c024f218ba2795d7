//! Noise: seeded continuous 2D noise and fractal (fbm) composition.
//!
//! # Invariants
//! - Noise functions are pure: no interior state beyond their seed.
//! - Two fields built from the same seed return identical samples.

mod fbm;
mod field;

pub use fbm::{Fbm, FbmConfig};
pub use field::{Noise2D, SimplexField};

use roadscape_common::ConfigError;

/// The terrain noise used by the renderer: fbm over seeded simplex.
pub fn terrain_noise(seed: u32, config: &FbmConfig) -> Result<Fbm<SimplexField>, ConfigError> {
    Fbm::new(SimplexField::new(seed), config)
}

pub fn crate_info() -> &'static str {
    "roadscape-noise v0.1.0"
}
