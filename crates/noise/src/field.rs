use noise::{NoiseFn, Simplex};

/// A continuous scalar field over two real coordinates, roughly in `[-1, 1]`.
pub trait Noise2D {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<N: Noise2D + ?Sized> Noise2D for &N {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// Simplex noise seeded explicitly at construction.
#[derive(Clone)]
pub struct SimplexField {
    seed: u32,
    inner: Simplex,
}

impl SimplexField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            inner: Simplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl std::fmt::Debug for SimplexField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexField").field("seed", &self.seed).finish()
    }
}

/// Largest coordinate magnitude the lattice lookup accepts (2^52). Past this
/// an `f64` has no fractional part left.
pub const MAX_COORDINATE: f64 = 4_503_599_627_370_496.0;

impl Noise2D for SimplexField {
    /// NaN for non-finite coordinates or ones beyond [`MAX_COORDINATE`].
    fn sample(&self, x: f64, y: f64) -> f64 {
        if !(x.is_finite() && y.is_finite()) || x.abs().max(y.abs()) > MAX_COORDINATE {
            return f64::NAN;
        }
        self.inner.get([x, y])
    }
}
