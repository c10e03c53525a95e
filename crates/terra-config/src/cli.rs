//! Command-line overrides shared by terra binaries.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Command-line arguments that override values loaded from `config.ron`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Generator seed.
    #[arg(long, global = true)]
    pub seed: Option<u32>,

    /// Number of fBm octaves (negative counts as zero).
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub octaves: Option<i32>,

    /// Frequency multiplier between octaves.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lacunarity: Option<f64>,

    /// Amplitude multiplier between octaves.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub gain: Option<f64>,

    /// Log filter (error, warn, info, debug, trace, or a RUST_LOG directive).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.noise.seed = seed;
        }
        if let Some(octaves) = args.octaves {
            self.noise.fractal.octaves = octaves;
        }
        if let Some(lacunarity) = args.lacunarity {
            self.noise.fractal.lacunarity = lacunarity;
        }
        if let Some(gain) = args.gain {
            self.noise.fractal.gain = gain;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
