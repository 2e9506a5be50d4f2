//! # Noise Source Module
//!
//! The seam between procedural generation and the noise implementation. Production code
//! uses seeded simplex noise; tests substitute fixed fields to drive thresholds and the
//! non-finite fallback path.

use noise::{NoiseFn, Simplex};

/// A deterministic scalar field in two and three dimensions.
///
/// Implementations should return values in roughly `[-1, 1]`. Callers clamp finite
/// samples into that range and treat non-finite ones as failed evaluations.
pub trait NoiseSource {
    /// Samples the 2D field at `(x, z)`.
    fn noise_2d(&self, x: f64, z: f64) -> f64;

    /// Samples the 3D field at `(x, y, z)`.
    fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64;

    /// Switches the field to the one for `seed`. Fixed fields ignore it.
    fn reseed(&mut self, _seed: u32) {}
}

/// Seeded simplex noise.
pub struct SimplexNoiseSource {
    simplex: Simplex,
}

impl SimplexNoiseSource {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
        }
    }
}

impl NoiseSource for SimplexNoiseSource {
    fn noise_2d(&self, x: f64, z: f64) -> f64 {
        self.simplex.get([x, z])
    }

    fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z])
    }

    fn reseed(&mut self, seed: u32) {
        self.simplex = Simplex::new(seed);
    }
}

/// Turns a raw sample into a usable value.
///
/// # Returns
/// The sample clamped to `[-1, 1]`, or `None` when it is NaN or infinite.
pub fn sanitize(sample: f64) -> Option<f64> {
    if sample.is_finite() {
        Some(sample.clamp(-1.0, 1.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_clamps_and_rejects_non_finite() {
        assert_eq!(sanitize(0.25), Some(0.25));
        assert_eq!(sanitize(3.0), Some(1.0));
        assert_eq!(sanitize(-7.5), Some(-1.0));
        assert_eq!(sanitize(f64::NAN), None);
        assert_eq!(sanitize(f64::NEG_INFINITY), None);
    }

    #[test]
    fn simplex_is_seeded() {
        let a = SimplexNoiseSource::new(7);
        let b = SimplexNoiseSource::new(7);
        assert_eq!(a.noise_2d(1.3, -4.1), b.noise_2d(1.3, -4.1));
        assert_eq!(a.noise_3d(0.1, 0.2, 0.3), b.noise_3d(0.1, 0.2, 0.3));
    }

    #[test]
    fn reseeding_matches_a_fresh_source() {
        let mut reseeded = SimplexNoiseSource::new(1);
        reseeded.reseed(99);
        let fresh = SimplexNoiseSource::new(99);
        assert_eq!(reseeded.noise_2d(3.7, -0.4), fresh.noise_2d(3.7, -0.4));
        assert_eq!(reseeded.noise_3d(0.5, 1.5, -2.5), fresh.noise_3d(0.5, 1.5, -2.5));
    }
}
