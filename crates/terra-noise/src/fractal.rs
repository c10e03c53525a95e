//! Fractal Brownian motion (fBm): octave summation over any 3D noise function.
//!
//! Each octave scales the sample point by `lacunarity^i` and the contribution
//! by `gain^i`. The sum is not normalized; see [`FractalParams::max_amplitude`].

use noise::NoiseFn;
use serde::{Deserialize, Serialize};

/// Octave configuration for [`fbm`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Number of octaves to sum. Zero or negative contributes nothing.
    /// Summation stops early once the frequency overflows or the amplitude
    /// underflows to zero, so very large counts stay finite.
    pub octaves: i32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub gain: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

impl FractalParams {
    /// Octave count with negative values clamped to zero.
    #[inline]
    pub fn octave_count(&self) -> u32 {
        self.octaves.max(0) as u32
    }

    /// Sum of absolute octave amplitudes: the worst-case magnitude of [`fbm`]
    /// over a noise function bounded by 1.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0_f64;
        for _ in 0..self.octave_count() {
            sum += amp.abs();
            amp *= self.gain;
        }
        sum
    }
}

/// Sum `octaves` layers of `noise_fn`, starting at frequency 1 and amplitude 1.
///
/// `octaves <= 0` returns exactly `0.0`. With one octave the result is exactly
/// `noise_fn(x, y, z)`. Octaves past the point where the frequency is no
/// longer finite, or the amplitude has reached zero, are skipped.
pub fn fbm<F>(noise_fn: F, x: f64, y: f64, z: f64, params: &FractalParams) -> f64
where
    F: Fn(f64, f64, f64) -> f64,
{
    let mut total = 0.0;
    let mut frequency: f64 = 1.0;
    let mut amplitude = 1.0;

    for _ in 0..params.octave_count() {
        // Default lacunarity overflows at octave 1024, while the amplitude is
        // still subnormal: inf * 0 would turn the sum into NaN.
        if !frequency.is_finite() || amplitude == 0.0 {
            break;
        }
        total += amplitude * noise_fn(x * frequency, y * frequency, z * frequency);
        frequency *= params.lacunarity;
        amplitude *= params.gain;
    }

    total
}

/// A noise source wrapped with fixed octave settings.
///
/// Behaves as a plain [`NoiseFn`], so a fractal field can be passed anywhere a
/// single-octave one is accepted.
#[derive(Clone, Debug)]
pub struct Fractal<N> {
    source: N,
    params: FractalParams,
}

impl<N> Fractal<N> {
    /// Wrap `source` with the given octave settings.
    pub fn new(source: N, params: FractalParams) -> Self {
        Self { source, params }
    }

    /// The octave settings.
    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    /// The wrapped source.
    pub fn source(&self) -> &N {
        &self.source
    }
}

impl<N: NoiseFn<f64, 3>> NoiseFn<f64, 3> for Fractal<N> {
    fn get(&self, point: [f64; 3]) -> f64 {
        fbm(
            |x, y, z| self.source.get([x, y, z]),
            point[0],
            point[1],
            point[2],
            &self.params,
        )
    }
}
