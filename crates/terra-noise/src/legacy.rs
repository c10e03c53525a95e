//! Sine-hash scalar noise kept for simple callers.
//!
//! Not gradient noise: neighbouring inputs give unrelated outputs and the
//! distribution is only roughly uniform. Use [`crate::GradientNoise`] for
//! anything that needs smoothness.

/// `fract(sin(x * seed) * 10000)`, in `[0, 1)`.
///
/// Computed with `libm::sin` so the value does not depend on the platform libm.
/// NaN or infinite input yields NaN.
pub fn legacy_noise(x: f64, seed: u32) -> f64 {
    let s = libm::sin(x * f64::from(seed)) * 10_000.0;
    let f = s - s.floor();
    // Tiny negative `s` rounds `s - floor(s)` up to exactly 1.0.
    if f >= 1.0 { 0.0 } else { f }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_input_same_output() {
        let first = legacy_noise(1.2345, 42);
        let second = legacy_noise(1.2345, 42);
        assert_eq!(first, second);
        assert!((0.0..1.0).contains(&first), "value {first} out of [0, 1)");
    }

    #[test]
    fn test_range_over_sweep() {
        for seed in [0, 1, 7, 42, 65_535, u32::MAX] {
            for i in -500..500 {
                let v = legacy_noise(i as f64 * 0.0137, seed);
                assert!((0.0..1.0).contains(&v), "seed {seed}, i {i}: {v}");
            }
        }
    }

    #[test]
    fn test_zero_seed_is_zero() {
        assert_eq!(legacy_noise(3.5, 0), 0.0);
    }

    #[test]
    fn test_tiny_negative_folds_into_range() {
        // sin(-1e-21) * 1e4 = -1e-17, and -1e-17 + 1.0 rounds to 1.0.
        let v = legacy_noise(-1e-21, 1);
        assert!((0.0..1.0).contains(&v), "value {v} out of [0, 1)");
    }

    #[test]
    fn test_non_finite_is_nan() {
        assert!(legacy_noise(f64::NAN, 42).is_nan());
        assert!(legacy_noise(f64::INFINITY, 42).is_nan());
    }
}
