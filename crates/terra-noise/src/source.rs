//! The noise capability set shared by every generator, plus the free-function
//! interface used by collaborators that only need a handful of calls.

use crate::feature::FeatureKey;
use crate::fractal::{FractalParams, fbm};
use crate::perlin::GradientNoise;

/// A thread-safe scalar noise field with 2D, 3D and fractal evaluation.
pub trait NoiseSource: Send + Sync {
    /// Sample the field at a 3D point.
    fn evaluate_3d(&self, x: f64, y: f64, z: f64) -> f64;

    /// Sample the `z = 0` plane.
    fn evaluate_2d(&self, x: f64, y: f64) -> f64 {
        self.evaluate_3d(x, y, 0.0)
    }

    /// fBm over this field.
    fn fractal_sum(&self, x: f64, y: f64, z: f64, params: &FractalParams) -> f64 {
        fbm(|x, y, z| self.evaluate_3d(x, y, z), x, y, z, params)
    }
}

impl NoiseSource for GradientNoise {
    #[inline]
    fn evaluate_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise3(x, y, z)
    }

    #[inline]
    fn evaluate_2d(&self, x: f64, y: f64) -> f64 {
        self.noise2(x, y)
    }
}

impl<S: NoiseSource + ?Sized> NoiseSource for &S {
    fn evaluate_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).evaluate_3d(x, y, z)
    }

    fn evaluate_2d(&self, x: f64, y: f64) -> f64 {
        (**self).evaluate_2d(x, y)
    }

    fn fractal_sum(&self, x: f64, y: f64, z: f64, params: &FractalParams) -> f64 {
        (**self).fractal_sum(x, y, z, params)
    }
}

/// Build a gradient-noise generator from `seed`.
pub fn create_generator(seed: u32) -> GradientNoise {
    GradientNoise::new(seed)
}

/// 2D noise at `(x, y)`.
pub fn evaluate_2d(source: &impl NoiseSource, x: f64, y: f64) -> f64 {
    source.evaluate_2d(x, y)
}

/// 3D noise at `(x, y, z)`.
pub fn evaluate_3d(source: &impl NoiseSource, x: f64, y: f64, z: f64) -> f64 {
    source.evaluate_3d(x, y, z)
}

/// fBm of an arbitrary noise function. Alias of [`fbm`].
pub fn fractal_sum<F>(noise_fn: F, x: f64, y: f64, z: f64, params: &FractalParams) -> f64
where
    F: Fn(f64, f64, f64) -> f64,
{
    fbm(noise_fn, x, y, z, params)
}

/// Reproducible scalar for a tagged feature; see [`FeatureKey`].
pub fn feature_factor(
    source: &impl NoiseSource,
    id: i64,
    category: &str,
    layer: i64,
    sub_tag: &str,
) -> f64 {
    FeatureKey::new(id, category, layer, sub_tag).sample(source)
}
