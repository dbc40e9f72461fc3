//! Smooth 1-D pseudo-random noise used to drive node motion.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LATTICE_BITS: u32 = 12;
const LATTICE_SIZE: usize = 1 << LATTICE_BITS;
const LATTICE_MASK: i64 = LATTICE_SIZE as i64 - 1;

/// A deterministic, continuous noise function.
///
/// Implementations must return values in `[0, 1]` and vary smoothly as `x`
/// advances: sampling the same coordinate twice yields the same value.
pub trait NoiseField: Send + Sync {
    fn sample(&self, x: f64) -> f64;
}

/// Layered value noise over a random lattice, eased with a cosine curve.
///
/// Each octave doubles the frequency and halves the amplitude. With the
/// default four octaves the output lies in `[0, 0.9375]`.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    lattice: Box<[f64]>,
    octaves: u32,
    falloff: f64,
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        Self::with_detail(seed, 4, 0.5)
    }

    /// `falloff` is clamped into `[0, 1)` so the output never leaves `[0, 1]`.
    pub fn with_detail(seed: u64, octaves: u32, falloff: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let lattice = (0..LATTICE_SIZE).map(|_| rng.gen::<f64>()).collect();
        Self {
            lattice,
            octaves: octaves.max(1),
            falloff: falloff.clamp(0.0, 0.999),
        }
    }

    #[inline]
    fn lattice_at(&self, i: i64) -> f64 {
        self.lattice[(i & LATTICE_MASK) as usize]
    }
}

#[inline]
fn ease(t: f64) -> f64 {
    0.5 * (1.0 - (t * std::f64::consts::PI).cos())
}

impl NoiseField for PerlinNoise {
    fn sample(&self, x: f64) -> f64 {
        let x = x.abs();
        let mut xi = x.floor() as i64;
        let mut xf = x - xi as f64;

        let mut total = 0.0;
        let mut amplitude = 0.5;
        for _ in 0..self.octaves {
            let a = self.lattice_at(xi);
            let b = self.lattice_at(xi.wrapping_add(1));
            total += (a + ease(xf) * (b - a)) * amplitude;

            amplitude *= self.falloff;
            xi = xi.wrapping_mul(2);
            xf *= 2.0;
            if xf >= 1.0 {
                xi = xi.wrapping_add(1);
                xf -= 1.0;
            }
        }
        total
    }
}

/// Always returns the same value. Handy for pinning motion in tests.
#[derive(Debug, Clone, Copy)]
pub struct ConstantNoise(pub f64);

impl NoiseField for ConstantNoise {
    fn sample(&self, _x: f64) -> f64 {
        self.0
    }
}
