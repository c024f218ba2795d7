//! Shared types: the flat point grid, viewport dimensions and the
//! configuration error taxonomy used by every stage of the pipeline.
//!
//! # Invariants
//! - A grid's buffer length equals `width * height * components`, always.
//! - Dimensions are validated at construction; per-frame code never divides
//!   by a zero dimension.

pub mod error;
pub mod grid;
pub mod types;

pub use error::ConfigError;
pub use grid::Grid2D;
pub use types::Viewport;

pub fn crate_info() -> &'static str {
    "roadscape-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
