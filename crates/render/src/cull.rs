use glam::Vec2;
use roadscape_common::{Grid2D, Viewport};

/// Pixel-space corners of one grid cell, in drawing order:
/// `(x, y)`, `(x + 1, y)`, `(x + 1, y + 1)`, `(x, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub vertices: [Vec2; 4],
}

/// Result of the visibility tests for a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Bounding box misses the viewport.
    OffScreen,
    BackFacing,
    /// A corner is NaN or infinite.
    Degenerate,
}

impl Quad {
    /// Read the quad whose top-left point is `(x, y)`. The first two
    /// components of each grid point are its pixel coordinates.
    pub fn from_grid(grid: &Grid2D, x: usize, y: usize) -> Option<Self> {
        let corner = |cx: usize, cy: usize| -> Option<Vec2> {
            let p = grid.point(cx, cy)?;
            Some(Vec2::new(*p.first()?, *p.get(1)?))
        };
        Some(Self {
            vertices: [
                corner(x, y)?,
                corner(x + 1, y)?,
                corner(x + 1, y + 1)?,
                corner(x, y + 1)?,
            ],
        })
    }

    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(|v| v.is_finite())
    }

    /// Coarse test: true when the bounding box lies entirely outside the viewport.
    ///
    /// A quad beside a viewport corner can pass while covering no pixel.
    pub fn is_off_screen(&self, width: f32, height: f32) -> bool {
        let v = &self.vertices;
        !v.iter().any(|p| p.x >= 0.0)
            || !v.iter().any(|p| p.x <= width)
            || !v.iter().any(|p| p.y >= 0.0)
            || !v.iter().any(|p| p.y <= height)
    }

    /// True when both `a x b` and `a x c` are negative, with `a`, `b`, `c` the
    /// edges from vertex 0 to vertices 1, 3 and 2 in y-up orientation.
    ///
    /// Only this one sign combination culls.
    pub fn is_back_facing(&self) -> bool {
        let [v0, v1, v2, v3] = self.vertices;
        let edge = |to: Vec2| Vec2::new(to.x - v0.x, v0.y - to.y);
        let a = edge(v1);
        let b = edge(v3);
        let c = edge(v2);
        a.perp_dot(b) < 0.0 && a.perp_dot(c) < 0.0
    }

    pub fn visibility(&self, viewport: Viewport) -> Visibility {
        if !self.is_finite() {
            Visibility::Degenerate
        } else if self.is_off_screen(viewport.width() as f32, viewport.height() as f32) {
            Visibility::OffScreen
        } else if self.is_back_facing() {
            Visibility::BackFacing
        } else {
            Visibility::Visible
        }
    }
}
