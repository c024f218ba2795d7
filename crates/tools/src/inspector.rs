use roadscape_common::Grid2D;
use roadscape_render::{DrawCall, fade_alpha};
use sha2::{Digest, Sha256};

/// Read-only queries over a rendered grid.
pub struct FrameInspector;

impl FrameInspector {
    /// Summarize a terrain grid whose points are `[pixel x, pixel y, depth]`.
    pub fn summary(grid: &Grid2D, fade_threshold: f64) -> FrameSummary {
        let mut summary = FrameSummary {
            grid_width: grid.width(),
            grid_height: grid.height(),
            total_points: grid.len(),
            finite_points: 0,
            min: [f32::INFINITY; 2],
            max: [f32::NEG_INFINITY; 2],
            faded_rows: 0,
        };

        // points without a pixel pair or a depth contribute nothing
        if grid.components() < 3 {
            tracing::debug!(components = grid.components(), "grid has no pixel/depth layout");
            return summary;
        }

        grid.for_each(|p, _, _, i| {
            let (x, y) = (p[i], p[i + 1]);
            if x.is_finite() && y.is_finite() {
                summary.finite_points += 1;
                summary.min = [summary.min[0].min(x), summary.min[1].min(y)];
                summary.max = [summary.max[0].max(x), summary.max[1].max(y)];
            }
        });

        summary.faded_rows = (0..grid.height())
            .filter_map(|y| grid.point(0, y))
            .filter(|p| fade_alpha(p[2] as f64, fade_threshold) < 1.0)
            .count();

        tracing::debug!(
            finite = summary.finite_points,
            total = summary.total_points,
            faded_rows = summary.faded_rows,
            "grid inspected"
        );
        summary
    }
}

/// Grid statistics for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub grid_width: usize,
    pub grid_height: usize,
    pub total_points: usize,
    pub finite_points: usize,
    /// Pixel-space bounds over finite points; infinite when there are none.
    pub min: [f32; 2],
    pub max: [f32; 2],
    /// Rows drawn with less than full opacity.
    pub faded_rows: usize,
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid: {}x{} finite={}/{} bounds=({:.1}, {:.1})..({:.1}, {:.1}) faded_rows={}",
            self.grid_width,
            self.grid_height,
            self.finite_points,
            self.total_points,
            self.min[0],
            self.min[1],
            self.max[0],
            self.max[1],
            self.faded_rows
        )
    }
}

/// SHA-256 over the JSON encoding of a draw-call sequence.
pub fn draw_digest(calls: &[DrawCall]) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(&serde_json::to_vec(calls)?))
}

/// SHA-256 over the raw bytes of a grid buffer.
pub fn grid_digest(grid: &Grid2D) -> String {
    sha256_hex(bytemuck::cast_slice(grid.points()))
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
