//! Deterministic noise helpers for synthetic projections.
//!
//! The functions here avoid `thread_rng` and do not depend on the internal
//! algorithm of `rand` RNGs. This keeps synthetic datasets stable across
//! versions and platforms.

use crate::{Real, Vec2};

/// Deterministic uniform sensor-plane noise in `[-max_abs, +max_abs]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UniformSensorNoise {
    /// Base seed controlling the pseudo-random sequence.
    pub seed: u64,
    /// Maximum absolute per-axis noise (sensor-plane units).
    pub max_abs: Real,
}

impl UniformSensorNoise {
    /// Sample a deterministic 2D noise vector for a `(frame_idx, diode_idx)` key.
    #[inline]
    pub fn sample(&self, frame_idx: usize, diode_idx: usize) -> Vec2 {
        let max_abs = self.max_abs.abs();
        if max_abs == 0.0 {
            return Vec2::zeros();
        }

        let key = mix_key(self.seed, frame_idx, diode_idx);
        let u = u64_to_unit_f64(splitmix64(key));
        let v = u64_to_unit_f64(splitmix64(key ^ 0x94D0_49BB_1331_11EB));

        // Map [0, 1) -> [-max_abs, +max_abs].
        Vec2::new((u - 0.5) * 2.0 * max_abs, (v - 0.5) * 2.0 * max_abs)
    }
}

#[inline]
fn mix_key(seed: u64, frame_idx: usize, diode_idx: usize) -> u64 {
    seed ^ (frame_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (diode_idx as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn u64_to_unit_f64(x: u64) -> Real {
    // Top 53 bits -> [0, 1).
    let mantissa = x >> 11;
    (mantissa as Real) * (1.0 / ((1u64 << 53) as Real))
}
