//! Horizontal scatter for freshly spawned batch creatures.

use rand::Rng;
use rand_distr::{Distribution, Triangular, TriangularError};

/// Largest impulse along one horizontal axis.
pub const SCATTER_BOUND: f64 = 1.1485;

/// Symmetric triangular distribution around zero, sampled once per axis.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    axis: Triangular<f64>,
}

impl Scatter {
    pub fn new(bound: f64) -> Result<Self, TriangularError> {
        Ok(Self {
            axis: Triangular::new(-bound, bound, 0.0)?,
        })
    }

    /// Draws an `(x, z)` impulse, x first.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let dx = self.axis.sample(rng);
        let dz = self.axis.sample(rng);
        (dx, dz)
    }
}
