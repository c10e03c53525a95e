//! Feature factors: reproducible scalars for tagged procedural features.
//!
//! A feature such as "the radius of ring layer 2 on planet 42" is named by an
//! id, a category tag, a layer index and a sub-tag. The tuple is mapped to a
//! point in noise space and the field is sampled there. Nothing is cached; the
//! mapping is recomputed on every call.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::DVec3;

use crate::fractal::FractalParams;
use crate::source::NoiseSource;

/// Spacing between consecutive ids and layers in noise space. Irrational so
/// integer keys never land on the lattice, where gradient noise is zero.
pub const FEATURE_STRIDE: f64 = 1.618_033_988_749_895;

/// Extent of the offset a tag hash can contribute along one axis.
pub const TAG_SPAN: f64 = 64.0;

/// 64-bit hash of a tag string.
///
/// `DefaultHasher::new()` uses fixed keys, so the value is the same in every
/// process built with one toolchain. The standard library may change the
/// algorithm between Rust releases; feature factors are not meant to be
/// persisted across toolchain upgrades.
pub fn tag_hash(tag: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    hasher.finish()
}

/// Map the top 53 bits of a hash into `[0, 1)`.
#[inline]
fn unit(hash: u64) -> f64 {
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

/// Identifies one queryable feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeatureKey<'a> {
    /// Owner id (planet, body, region...).
    pub id: i64,
    /// Category tag, e.g. `"layer"`.
    pub category: &'a str,
    /// Layer index within the category.
    pub layer: i64,
    /// Parameter tag, e.g. `"radius"`.
    pub sub_tag: &'a str,
}

impl<'a> FeatureKey<'a> {
    /// Create a key.
    pub fn new(id: i64, category: &'a str, layer: i64, sub_tag: &'a str) -> Self {
        Self {
            id,
            category,
            layer,
            sub_tag,
        }
    }

    /// The noise-space point this key samples.
    ///
    /// `x` follows the id and category, `y` the layer and sub-tag, and `z`
    /// mixes both tags. Changing only the sub-tag moves `y` and `z`.
    pub fn coordinates(&self) -> DVec3 {
        let category = tag_hash(self.category);
        let sub_tag = tag_hash(self.sub_tag);
        let mixed = category ^ sub_tag.rotate_left(32);

        DVec3::new(
            self.id as f64 * FEATURE_STRIDE + unit(category) * TAG_SPAN,
            self.layer as f64 * FEATURE_STRIDE + unit(sub_tag) * TAG_SPAN,
            unit(mixed) * TAG_SPAN,
        )
    }

    /// Raw single-octave value, typically in `[-1, 1]`.
    pub fn sample(&self, source: &impl NoiseSource) -> f64 {
        let p = self.coordinates();
        source.evaluate_3d(p.x, p.y, p.z)
    }

    /// Multi-octave value, for smoother variation across neighbouring ids.
    pub fn sample_fractal(&self, source: &impl NoiseSource, params: &FractalParams) -> f64 {
        let p = self.coordinates();
        source.fractal_sum(p.x, p.y, p.z, params)
    }

    /// [`FeatureKey::sample`] remapped from `[-1, 1]` into `[0, 1]`.
    pub fn unit_factor(&self, source: &impl NoiseSource) -> f64 {
        ((self.sample(source) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GradientNoise;

    #[test]
    fn test_same_key_same_value() {
        let noise = GradientNoise::new(123);
        let key = FeatureKey::new(42, "layer", 0, "radius");
        assert_eq!(key.sample(&noise), key.sample(&noise));
        assert_eq!(
            key.sample(&noise),
            FeatureKey::new(42, "layer", 0, "radius").sample(&noise)
        );
    }

    #[test]
    fn test_sub_tag_changes_value() {
        let noise = GradientNoise::new(123);
        let a = FeatureKey::new(42, "layer", 0, "a").sample(&noise);
        let b = FeatureKey::new(42, "layer", 0, "b").sample(&noise);
        assert_ne!(a, b);
    }

    #[test]
    fn test_sub_tag_moves_coordinates() {
        let a = FeatureKey::new(42, "layer", 0, "radius").coordinates();
        let b = FeatureKey::new(42, "layer", 0, "thickness").coordinates();
        assert_eq!(a.x, b.x);
        assert_ne!(a.y, b.y);
        assert_ne!(a.z, b.z);
    }

    #[test]
    fn test_ids_and_layers_are_decorrelated() {
        let noise = GradientNoise::new(9);
        let base = FeatureKey::new(1, "crater", 0, "depth").sample(&noise);
        let other_id = FeatureKey::new(2, "crater", 0, "depth").sample(&noise);
        let other_layer = FeatureKey::new(1, "crater", 1, "depth").sample(&noise);
        assert_ne!(base, other_id);
        assert_ne!(base, other_layer);
    }

    #[test]
    fn test_tag_hash_is_deterministic() {
        assert_eq!(tag_hash("radius"), tag_hash("radius"));
        assert_ne!(tag_hash("radius"), tag_hash("Radius"));
    }

    #[test]
    fn test_coordinates_avoid_lattice() {
        for id in 0..32 {
            let p = FeatureKey::new(id, "layer", id % 4, "radius").coordinates();
            assert_ne!(p.x.fract(), 0.0);
            assert_ne!(p.y.fract(), 0.0);
        }
    }

    #[test]
    fn test_unit_factor_range() {
        let noise = GradientNoise::new(4);
        for id in 0..500 {
            let v = FeatureKey::new(id, "band", 3, "hue").unit_factor(&noise);
            assert!((0.0..=1.0).contains(&v), "unit factor {v} out of range");
        }
    }

    #[test]
    fn test_fractal_one_octave_matches_sample() {
        let noise = GradientNoise::new(64);
        let key = FeatureKey::new(-7, "layer", 2, "radius");
        let params = FractalParams {
            octaves: 1,
            ..Default::default()
        };
        assert_eq!(key.sample_fractal(&noise, &params), key.sample(&noise));
    }
}
