//! Probe subcommands and their JSON results.

use clap::Subcommand;
use serde::Serialize;
use terra_config::Config;
use terra_noise::{
    FeatureKey, GridError, NoiseSource, SurfaceSample, evaluate_2d, evaluate_3d, legacy_noise,
};

/// One query against the configured generator.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Gradient noise at a point (2D when `z` is omitted).
    #[command(allow_negative_numbers = true)]
    Noise { x: f64, y: f64, z: Option<f64> },

    /// Fractal sum at a point using the configured octave settings.
    #[command(allow_negative_numbers = true)]
    Fbm { x: f64, y: f64, z: f64 },

    /// Feature factor for (id, category, layer, sub-tag).
    #[command(allow_negative_numbers = true)]
    Feature {
        id: i64,
        category: String,
        layer: i64,
        sub_tag: String,
        /// Sum octaves instead of taking a single sample.
        #[arg(long)]
        fractal: bool,
    },

    /// Legacy sine-hash noise.
    #[command(allow_negative_numbers = true)]
    Legacy { x: f64, seed: u32 },

    /// Planet surface at latitude / longitude in degrees.
    #[command(allow_negative_numbers = true)]
    Surface {
        lat: f64,
        lon: f64,
        #[arg(long, default_value_t = 0.0)]
        time: f64,
    },

    /// Equirectangular grid of surface samples.
    Grid {
        width: usize,
        height: usize,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        time: f64,
    },
}

/// Result of a [`Command`], printed as one JSON document.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    Noise {
        seed: u32,
        point: Vec<f64>,
        value: f64,
    },
    Fbm {
        seed: u32,
        point: [f64; 3],
        octaves: i32,
        lacunarity: f64,
        gain: f64,
        value: f64,
    },
    Feature {
        seed: u32,
        id: i64,
        category: String,
        layer: i64,
        sub_tag: String,
        fractal: bool,
        value: f64,
    },
    Legacy {
        x: f64,
        seed: u32,
        value: f64,
    },
    Surface(SurfaceSample),
    Grid {
        width: usize,
        height: usize,
        time: f64,
        samples: Vec<SurfaceSample>,
    },
}

/// Execute `command` against the generator described by `config`.
///
/// Only `grid` can fail, when the requested grid is too large to allocate.
pub fn run(command: &Command, config: &Config) -> Result<Output, GridError> {
    let seed = config.noise.seed;
    let params = &config.noise.fractal;

    let output = match command {
        Command::Noise { x, y, z } => {
            let generator = config.generator();
            let (point, value) = match z {
                Some(z) => (vec![*x, *y, *z], evaluate_3d(&generator, *x, *y, *z)),
                None => (vec![*x, *y], evaluate_2d(&generator, *x, *y)),
            };
            Output::Noise { seed, point, value }
        }
        Command::Fbm { x, y, z } => {
            let value = config.generator().fractal_sum(*x, *y, *z, params);
            Output::Fbm {
                seed,
                point: [*x, *y, *z],
                octaves: params.octaves,
                lacunarity: params.lacunarity,
                gain: params.gain,
                value,
            }
        }
        Command::Feature {
            id,
            category,
            layer,
            sub_tag,
            fractal,
        } => {
            let generator = config.generator();
            let key = FeatureKey::new(*id, category, *layer, sub_tag);
            let fractal = *fractal || config.feature.fractal;
            let value = if fractal {
                key.sample_fractal(&generator, params)
            } else {
                key.sample(&generator)
            };
            Output::Feature {
                seed,
                id: *id,
                category: category.clone(),
                layer: *layer,
                sub_tag: sub_tag.clone(),
                fractal,
                value,
            }
        }
        Command::Legacy { x, seed } => Output::Legacy {
            x: *x,
            seed: *seed,
            value: legacy_noise(*x, *seed),
        },
        Command::Surface { lat, lon, time } => {
            Output::Surface(config.planet_surface().sample_lat_lon(*lat, *lon, *time))
        }
        Command::Grid {
            width,
            height,
            time,
        } => {
            let samples = config.planet_surface().sample_grid(*width, *height, *time)?;
            tracing::debug!(count = samples.len(), "grid sampled");
            Output::Grid {
                width: *width,
                height: *height,
                time: *time,
                samples,
            }
        }
    };
    Ok(output)
}
