use crate::error::ConfigError;

/// Row-major lattice of fixed-arity `f32` point records.
///
/// Point `(x, y)` occupies `points[(y * width + x) * components..][..components]`.
/// The buffer is allocated once and only its values change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    width: usize,
    height: usize,
    components: usize,
    points: Vec<f32>,
}

impl Grid2D {
    /// Allocate a zero-filled grid. Fails when any dimension is zero.
    pub fn new(width: usize, height: usize, components: usize) -> Result<Self, ConfigError> {
        let len = checked_len(width, height, components)?;
        Ok(Self {
            width,
            height,
            components,
            points: vec![0.0; len],
        })
    }

    /// Wrap an existing buffer, which must hold exactly `width * height * components` values.
    pub fn from_vec(
        width: usize,
        height: usize,
        components: usize,
        points: Vec<f32>,
    ) -> Result<Self, ConfigError> {
        let expected = checked_len(width, height, components)?;
        if points.len() != expected {
            return Err(ConfigError::BufferLength {
                expected,
                actual: points.len(),
            });
        }
        Ok(Self {
            width,
            height,
            components,
            points,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of lattice points.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false for a constructed grid; dimensions are non-zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    /// Flat offset of the first component of `(x, y)`, or `None` outside the lattice.
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * self.components)
    }

    pub fn point(&self, x: usize, y: usize) -> Option<&[f32]> {
        let i = self.index(x, y)?;
        Some(&self.points[i..i + self.components])
    }

    pub fn point_mut(&mut self, x: usize, y: usize) -> Option<&mut [f32]> {
        let i = self.index(x, y)?;
        let c = self.components;
        Some(&mut self.points[i..i + c])
    }

    /// Visit every point in scan order (y outer, x inner).
    ///
    /// The callback receives the whole buffer plus the flat offset of the
    /// point's first component.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&[f32], usize, usize, usize),
    {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = (y * self.width + x) * self.components;
                f(&self.points, x, y, i);
            }
        }
    }

    /// Mutable variant of [`Grid2D::for_each`]. Values may change, the shape cannot.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut [f32], usize, usize, usize),
    {
        let (width, height, components) = (self.width, self.height, self.components);
        for y in 0..height {
            for x in 0..width {
                let i = (y * width + x) * components;
                f(&mut self.points, x, y, i);
            }
        }
    }
}

fn checked_len(width: usize, height: usize, components: usize) -> Result<usize, ConfigError> {
    let invalid = ConfigError::InvalidDimensions {
        width,
        height,
        components,
    };
    if width == 0 || height == 0 || components == 0 {
        return Err(invalid);
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(components))
        .ok_or(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_zeroed_with_exact_length() {
        for (w, h, c) in [(1, 1, 1), (4, 32, 3), (64, 64, 3), (7, 3, 5)] {
            let grid = Grid2D::new(w, h, c).unwrap();
            assert_eq!(grid.points().len(), w * h * c);
            assert_eq!(grid.len(), w * h);
            assert!(!grid.is_empty());
            assert!(grid.points().iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Grid2D::new(0, 4, 3).is_err());
        assert!(Grid2D::new(4, 0, 3).is_err());
        assert!(Grid2D::new(4, 4, 0).is_err());
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        assert!(Grid2D::new(usize::MAX, 2, 3).is_err());
    }

    #[test]
    fn from_vec_checks_length() {
        let err = Grid2D::from_vec(2, 2, 3, vec![0.0; 11]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BufferLength {
                expected: 12,
                actual: 11
            }
        );
        assert!(Grid2D::from_vec(2, 2, 3, vec![1.0; 12]).is_ok());
    }

    #[test]
    fn for_each_visits_row_major_with_flat_index() {
        let grid = Grid2D::new(3, 2, 3).unwrap();
        let mut visited = Vec::new();
        grid.for_each(|_, x, y, i| visited.push((x, y, i)));

        assert_eq!(
            visited,
            vec![
                (0, 0, 0),
                (1, 0, 3),
                (2, 0, 6),
                (0, 1, 9),
                (1, 1, 12),
                (2, 1, 15),
            ]
        );
    }

    #[test]
    fn for_each_mut_writes_through() {
        let mut grid = Grid2D::new(4, 3, 2).unwrap();
        grid.for_each_mut(|p, x, y, i| {
            p[i] = x as f32;
            p[i + 1] = y as f32;
        });

        assert_eq!(grid.point(3, 2), Some(&[3.0, 2.0][..]));
        assert_eq!(grid.point(0, 1), Some(&[0.0, 1.0][..]));
        assert_eq!(grid.points().len(), 4 * 3 * 2);
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let mut grid = Grid2D::new(2, 2, 3).unwrap();
        assert_eq!(grid.index(1, 1), Some(9));
        assert_eq!(grid.index(2, 0), None);
        assert!(grid.point(0, 2).is_none());

        grid.point_mut(1, 0).unwrap()[2] = 0.5;
        assert_eq!(grid.points()[5], 0.5);
    }
}
