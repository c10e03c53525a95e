//! Seeded gradient noise for procedural planets: permutation tables, improved
//! Perlin noise, fractal sums, tagged feature factors and surface sampling.
//!
//! Every value is a pure function of an explicit seed and explicit inputs.
//! Generators are immutable after construction and can be shared across
//! threads without synchronization.

mod feature;
mod fractal;
mod legacy;
mod perlin;
mod permutation;
mod source;
mod surface;

pub use feature::{FEATURE_STRIDE, FeatureKey, TAG_SPAN, tag_hash};
pub use fractal::{Fractal, FractalParams, fbm};
pub use legacy::legacy_noise;
pub use perlin::{DEFAULT_SEED, GradientNoise, fade, grad};
pub use permutation::{Mulberry32, PERIOD, PermutationTable, TABLE_LEN};
pub use source::{
    NoiseSource, create_generator, evaluate_2d, evaluate_3d, feature_factor, fractal_sum,
};
pub use surface::{
    Biome, GridError, PlanetSurface, SurfaceParams, SurfaceSample, grid_lat_lon,
    lat_lon_to_direction,
};
