//! Improved Perlin gradient noise over a seeded permutation table.

use std::sync::Arc;

use noise::{NoiseFn, Seedable};

use crate::permutation::{PERIOD, PermutationTable};

/// Seed used by [`GradientNoise::default`].
pub const DEFAULT_SEED: u32 = 1234;

/// Quintic fade `6t^5 - 15t^4 + 10t^3`.
///
/// First and second derivatives vanish at `t = 0` and `t = 1`, which keeps the
/// interpolated field C1-continuous across lattice cells.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Dot product of the offset with one of the 12 cube-edge gradients, chosen
/// by the low 4 bits of `hash`. Slots 12..16 repeat four of the edges.
#[inline]
pub fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

/// Lattice cell index and fractional offset along one axis.
///
/// The float-to-int cast saturates (NaN becomes 0), so non-finite input never
/// indexes out of bounds; the offset carries the NaN instead.
#[inline]
fn cell(v: f64) -> (usize, f64) {
    let floor = v.floor();
    ((floor as i64 & (PERIOD as i64 - 1)) as usize, v - floor)
}

/// A seeded gradient-noise generator.
///
/// Cloning shares the immutable permutation table, so handles can be copied
/// freely and used from any number of threads.
#[derive(Clone, Debug)]
pub struct GradientNoise {
    seed: u32,
    table: Arc<PermutationTable>,
}

impl GradientNoise {
    /// Build a generator, shuffling its permutation table from `seed`.
    pub fn new(seed: u32) -> Self {
        tracing::debug!(seed, "building gradient noise permutation table");
        Self {
            seed,
            table: Arc::new(PermutationTable::build(seed)),
        }
    }

    /// The seed this generator was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The permutation table backing this generator.
    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    /// 2D noise: the `z = 0` slice of [`GradientNoise::noise3`].
    #[inline]
    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        self.noise3(x, y, 0.0)
    }

    /// 3D noise, typically in `[-1, 1]`. Zero at every lattice point.
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = &*self.table;

        let (xi, x) = cell(x);
        let (yi, y) = cell(y);
        let (zi, z) = cell(z);

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = p.get(xi) + yi;
        let aa = p.get(a) + zi;
        let ab = p.get(a + 1) + zi;
        let b = p.get(xi + 1) + yi;
        let ba = p.get(b) + zi;
        let bb = p.get(b + 1) + zi;

        lerp(
            lerp(
                lerp(
                    grad(p.get(aa), x, y, z),
                    grad(p.get(ba), x - 1.0, y, z),
                    u,
                ),
                lerp(
                    grad(p.get(ab), x, y - 1.0, z),
                    grad(p.get(bb), x - 1.0, y - 1.0, z),
                    u,
                ),
                v,
            ),
            lerp(
                lerp(
                    grad(p.get(aa + 1), x, y, z - 1.0),
                    grad(p.get(ba + 1), x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    grad(p.get(ab + 1), x, y - 1.0, z - 1.0),
                    grad(p.get(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }
}

impl Default for GradientNoise {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl NoiseFn<f64, 2> for GradientNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.noise2(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for GradientNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.noise3(point[0], point[1], point[2])
    }
}

impl Seedable for GradientNoise {
    fn set_seed(self, seed: u32) -> Self {
        if seed == self.seed {
            return self;
        }
        Self::new(seed)
    }

    fn seed(&self) -> u32 {
        self.seed
    }
}
