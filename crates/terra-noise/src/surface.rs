//! Planet surface sampling: elevation, displaced radius, climate and biome.
//!
//! Directions on the unit sphere are fed through fBm gradient noise for
//! elevation. Temperature follows latitude with a slow sine wobble, moisture a
//! sine band, and the pair selects a biome from a small Whittaker-style table.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::fractal::FractalParams;
use crate::perlin::GradientNoise;
use crate::source::NoiseSource;

/// Surface biome classes, with ocean overriding climate below sea level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Ocean,
    Ice,
    Tundra,
    Steppe,
    Forest,
    Desert,
    Jungle,
}

impl Biome {
    /// Classify a land point from normalized temperature and moisture.
    pub fn classify(temperature: f64, moisture: f64) -> Self {
        if temperature < 0.3 {
            if moisture < 0.3 { Self::Ice } else { Self::Tundra }
        } else if temperature < 0.6 {
            if moisture < 0.3 { Self::Steppe } else { Self::Forest }
        } else if moisture < 0.5 {
            Self::Desert
        } else {
            Self::Jungle
        }
    }

    /// RGB display colour from the viewer palette.
    pub fn color(self) -> [f32; 3] {
        match self {
            Self::Ocean => [0.0, 0.3, 0.8],
            Self::Ice => [0.8, 0.8, 0.9],
            Self::Tundra => [0.6, 0.7, 0.8],
            Self::Steppe => [0.8, 0.8, 0.5],
            Self::Forest => [0.1, 0.6, 0.2],
            Self::Desert => [0.9, 0.8, 0.4],
            Self::Jungle => [0.2, 0.7, 0.3],
        }
    }
}

/// Tuning for [`PlanetSurface`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Scale applied to the unit direction before noise sampling.
    pub frequency: f64,
    /// Noise-space drift per unit of time, added on every axis.
    pub time_scale: f64,
    /// Amplitude of the first elevation octave.
    pub amplitude: f64,
    /// Octave settings for elevation.
    pub fractal: FractalParams,
    /// Radius displacement per unit of elevation.
    pub elevation_scale: f64,
    /// Elevation below which the surface is ocean.
    pub sea_level: f64,
    /// Angular frequency of the temperature and moisture sine bands.
    pub climate_frequency: f64,
    /// Phase drift of the climate bands per unit of time.
    pub climate_time_scale: f64,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            frequency: 5.0,
            time_scale: 0.1,
            amplitude: 0.5,
            fractal: FractalParams {
                octaves: 5,
                lacunarity: 2.0,
                gain: 0.5,
            },
            elevation_scale: 0.15,
            sea_level: -0.05,
            climate_frequency: 2.0,
            climate_time_scale: 0.1,
        }
    }
}

/// Everything known about one surface point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSample {
    /// Unit direction from the planet centre.
    pub direction: DVec3,
    /// Signed elevation (unitless, roughly within the fractal amplitude sum).
    pub elevation: f64,
    /// Displaced radius for a unit planet.
    pub radius: f64,
    /// Normalized temperature in `[0, 1]`.
    pub temperature: f64,
    /// Normalized moisture in `[0, 1]`.
    pub moisture: f64,
    /// Resulting biome.
    pub biome: Biome,
}

/// Samples a unit planet driven by one gradient-noise generator.
#[derive(Clone, Debug)]
pub struct PlanetSurface {
    noise: GradientNoise,
    params: SurfaceParams,
}

impl PlanetSurface {
    /// Create a surface sampler.
    pub fn new(noise: GradientNoise, params: SurfaceParams) -> Self {
        Self { noise, params }
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    /// The generator driving elevation.
    pub fn noise(&self) -> &GradientNoise {
        &self.noise
    }

    /// Elevation at a unit direction.
    pub fn elevation(&self, direction: DVec3, time: f64) -> f64 {
        let p = direction * self.params.frequency + DVec3::splat(time * self.params.time_scale);
        self.params.amplitude * self.noise.fractal_sum(p.x, p.y, p.z, &self.params.fractal)
    }

    /// Temperature and moisture at a unit direction, both clamped to `[0, 1]`.
    pub fn climate(&self, direction: DVec3, time: f64) -> (f64, f64) {
        let phase = time * self.params.climate_time_scale;
        let cf = self.params.climate_frequency;
        let temperature =
            ((direction.y + 1.0) * 0.5 + libm::sin(direction.x * cf + phase) * 0.1).clamp(0.0, 1.0);
        let moisture = (0.5 + libm::sin(direction.z * cf + phase) * 0.25).clamp(0.0, 1.0);
        (temperature, moisture)
    }

    /// Sample the surface along `direction`. The vector is normalized first;
    /// a zero vector stays zero.
    pub fn sample(&self, direction: DVec3, time: f64) -> SurfaceSample {
        let direction = direction.normalize_or_zero();
        let elevation = self.elevation(direction, time);
        let (temperature, moisture) = self.climate(direction, time);
        let biome = if elevation < self.params.sea_level {
            Biome::Ocean
        } else {
            Biome::classify(temperature, moisture)
        };

        SurfaceSample {
            direction,
            elevation,
            radius: 1.0 + elevation * self.params.elevation_scale,
            temperature,
            moisture,
            biome,
        }
    }

    /// Sample at latitude / longitude in degrees (+Y is north, longitude 0
    /// faces +Z).
    pub fn sample_lat_lon(&self, latitude: f64, longitude: f64, time: f64) -> SurfaceSample {
        self.sample(lat_lon_to_direction(latitude, longitude), time)
    }

    /// Sample an equirectangular `width x height` grid, row-major from the
    /// north-west corner, at pixel centres.
    ///
    /// Rows are split across scoped worker threads sharing this sampler; the
    /// result is identical to sampling serially. A zero dimension yields an
    /// empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TooLarge`] if the grid cannot be held in one buffer.
    pub fn sample_grid(
        &self,
        width: usize,
        height: usize,
        time: f64,
    ) -> Result<Vec<SurfaceSample>, GridError> {
        let len = grid_len(width, height)?;
        if len == 0 {
            return Ok(Vec::new());
        }

        let threads = num_cpus::get().clamp(1, height);
        let rows_per_thread = height.div_ceil(threads);
        tracing::trace!(width, height, threads, "sampling surface grid");

        let mut samples = vec![self.sample(DVec3::ZERO, time); len];
        std::thread::scope(|scope| {
            for (chunk_index, chunk) in samples.chunks_mut(rows_per_thread * width).enumerate() {
                let first_row = chunk_index * rows_per_thread;
                scope.spawn(move || {
                    for (i, out) in chunk.iter_mut().enumerate() {
                        let row = first_row + i / width;
                        let col = i % width;
                        let (lat, lon) = grid_lat_lon(row, col, width, height);
                        *out = self.sample_lat_lon(lat, lon, time);
                    }
                });
            }
        });
        Ok(samples)
    }
}

/// Errors from [`PlanetSurface::sample_grid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// `width * height` samples exceed the largest allocatable buffer.
    #[error("grid of {width}x{height} samples is too large")]
    TooLarge { width: usize, height: usize },
}

/// Sample count for a grid, bounded by what a `Vec<SurfaceSample>` can hold.
fn grid_len(width: usize, height: usize) -> Result<usize, GridError> {
    let max = isize::MAX as usize / std::mem::size_of::<SurfaceSample>();
    width
        .checked_mul(height)
        .filter(|&len| len <= max)
        .ok_or(GridError::TooLarge { width, height })
}

/// Unit direction for latitude / longitude in degrees.
pub fn lat_lon_to_direction(latitude: f64, longitude: f64) -> DVec3 {
    let lat = latitude.to_radians();
    let lon = longitude.to_radians();
    let (sin_lat, cos_lat) = (libm::sin(lat), libm::cos(lat));
    DVec3::new(
        cos_lat * libm::sin(lon),
        sin_lat,
        cos_lat * libm::cos(lon),
    )
}

/// Latitude / longitude in degrees of the centre of grid cell `(row, col)`.
pub fn grid_lat_lon(row: usize, col: usize, width: usize, height: usize) -> (f64, f64) {
    let lat = 90.0 - (row as f64 + 0.5) * 180.0 / height as f64;
    let lon = -180.0 + (col as f64 + 0.5) * 360.0 / width as f64;
    (lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn surface(seed: u32) -> PlanetSurface {
        PlanetSurface::new(GradientNoise::new(seed), SurfaceParams::default())
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(Biome::classify(0.1, 0.1), Biome::Ice);
        assert_eq!(Biome::classify(0.1, 0.5), Biome::Tundra);
        assert_eq!(Biome::classify(0.45, 0.29), Biome::Steppe);
        assert_eq!(Biome::classify(0.45, 0.3), Biome::Forest);
        assert_eq!(Biome::classify(0.6, 0.49), Biome::Desert);
        assert_eq!(Biome::classify(0.9, 0.5), Biome::Jungle);
    }

    #[test]
    fn test_radius_follows_elevation() {
        let s = surface(42);
        let sample = s.sample(DVec3::new(0.3, 0.4, 0.5), 0.0);
        let expected = 1.0 + sample.elevation * s.params().elevation_scale;
        assert!((sample.radius - expected).abs() < EPSILON);
    }

    #[test]
    fn test_ocean_below_sea_level() {
        let params = SurfaceParams {
            sea_level: f64::INFINITY,
            ..Default::default()
        };
        let s = PlanetSurface::new(GradientNoise::new(1), params);
        assert_eq!(s.sample(DVec3::X, 0.0).biome, Biome::Ocean);

        let params = SurfaceParams {
            sea_level: f64::NEG_INFINITY,
            ..Default::default()
        };
        let s = PlanetSurface::new(GradientNoise::new(1), params);
        assert_ne!(s.sample(DVec3::X, 0.0).biome, Biome::Ocean);
    }

    #[test]
    fn test_poles_are_cold_and_equator_warm() {
        let s = surface(5);
        let (north, _) = s.climate(DVec3::Y, 0.0);
        let (south, _) = s.climate(DVec3::NEG_Y, 0.0);
        let (equator, _) = s.climate(DVec3::Z, 0.0);
        assert_eq!(north, 1.0);
        assert_eq!(south, 0.0);
        assert!((equator - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_climate_in_unit_range() {
        let s = surface(6);
        for row in 0..20 {
            for col in 0..40 {
                let (lat, lon) = grid_lat_lon(row, col, 40, 20);
                let (t, m) = s.climate(lat_lon_to_direction(lat, lon), row as f64);
                assert!((0.0..=1.0).contains(&t));
                assert!((0.0..=1.0).contains(&m));
            }
        }
    }

    #[test]
    fn test_sample_normalizes_direction() {
        let s = surface(8);
        let a = s.sample(DVec3::new(0.0, 3.0, 4.0), 1.5);
        let b = s.sample(DVec3::new(0.0, 0.6, 0.8), 1.5);
        assert!((a.direction.length() - 1.0).abs() < EPSILON);
        assert!((a.elevation - b.elevation).abs() < EPSILON);
    }

    #[test]
    fn test_zero_direction_is_finite() {
        let sample = surface(8).sample(DVec3::ZERO, 0.0);
        assert_eq!(sample.direction, DVec3::ZERO);
        assert!(sample.elevation.is_finite());
    }

    #[test]
    fn test_time_animates_elevation() {
        let s = surface(13);
        let dir = DVec3::new(0.2, 0.7, -0.4);
        assert_ne!(s.elevation(dir.normalize(), 0.0), s.elevation(dir.normalize(), 3.3));
    }

    #[test]
    fn test_lat_lon_axes() {
        let north = lat_lon_to_direction(90.0, 0.0);
        assert!((north - DVec3::Y).length() < 1e-9);
        let front = lat_lon_to_direction(0.0, 0.0);
        assert!((front - DVec3::Z).length() < 1e-9);
        let east = lat_lon_to_direction(0.0, 90.0);
        assert!((east - DVec3::X).length() < 1e-9);
    }

    #[test]
    fn test_grid_matches_serial_sampling() {
        let s = surface(21);
        let (w, h) = (17, 9);
        let grid = s.sample_grid(w, h, 0.25).unwrap();
        assert_eq!(grid.len(), w * h);
        for row in 0..h {
            for col in 0..w {
                let (lat, lon) = grid_lat_lon(row, col, w, h);
                assert_eq!(grid[row * w + col], s.sample_lat_lon(lat, lon, 0.25));
            }
        }
    }

    #[test]
    fn test_empty_grid() {
        let s = surface(21);
        assert!(s.sample_grid(0, 10, 0.0).unwrap().is_empty());
        assert!(s.sample_grid(10, 0, 0.0).unwrap().is_empty());
        // Zero wins even when the other dimension is huge.
        assert!(s.sample_grid(0, usize::MAX, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let s = surface(21);
        assert_eq!(
            s.sample_grid(1 << 33, 1 << 33, 0.0),
            Err(GridError::TooLarge {
                width: 1 << 33,
                height: 1 << 33,
            })
        );
        assert!(s.sample_grid(usize::MAX, 2, 0.0).is_err());
        // Fits in usize but not in one allocation.
        assert!(s.sample_grid(isize::MAX as usize, 1, 0.0).is_err());
    }

    #[test]
    fn test_params_roundtrip_ron() {
        let params = SurfaceParams::default();
        let text = ron::to_string(&params).unwrap();
        let back: SurfaceParams = ron::from_str(&text).unwrap();
        assert_eq!(params, back);
    }
}
