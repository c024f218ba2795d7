//! Developer tooling: the frame time source, frame timing, and grid/frame
//! inspection for debugging and determinism checks.
//!
//! # Invariants
//! - Tools only read renderer state; nothing here mutates a grid.
//! - A frozen clock returns the same time on every call.

mod clock;
mod inspector;

pub use clock::{FrameClock, FrameSample, FrameTimer};
pub use inspector::{FrameInspector, FrameSummary, draw_digest, grid_digest};

pub fn crate_info() -> &'static str {
    "roadscape-tools v0.1.0"
}
