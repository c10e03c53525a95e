//! `terra-probe`: evaluate terra noise operations from the command line and
//! print the result as JSON on stdout.

mod commands;

use clap::Parser;
use terra_config::{CliArgs, Config, ConfigError, default_config_dir};

use crate::commands::Command;

/// Sample terra noise fields from the command line.
#[derive(Parser, Debug)]
#[command(name = "terra-probe", version, about = "Sample terra noise fields")]
struct ProbeArgs {
    #[command(flatten)]
    overrides: CliArgs,

    #[command(subcommand)]
    command: Command,
}

fn load_config(overrides: &CliArgs) -> Result<Config, ConfigError> {
    let config_dir = match &overrides.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(overrides);
    Ok(config)
}

fn main() {
    let args = ProbeArgs::parse();

    let config = match load_config(&args.overrides) {
        Ok(config) => config,
        Err(e) => {
            let _ = terra_log::init_logging(None, false, None);
            tracing::error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = terra_log::init_logging(None, false, Some(&config)) {
        eprintln!("Failed to initialize logging: {e}");
    }
    tracing::debug!(seed = config.noise.seed, command = ?args.command, "running probe");

    let output = match commands::run(&args.command, &config) {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Failed to sample: {e}");
            std::process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Failed to encode result: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_coordinates() {
        let args =
            ProbeArgs::try_parse_from(["terra-probe", "--seed", "9", "noise", "-1.5", "2", "-0.25"])
                .unwrap();
        assert_eq!(args.overrides.seed, Some(9));
        assert_eq!(
            args.command,
            Command::Noise {
                x: -1.5,
                y: 2.0,
                z: Some(-0.25),
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            ProbeArgs::try_parse_from(["terra-probe", "fbm", "0", "0", "0", "--octaves", "6"])
                .unwrap();
        assert_eq!(args.overrides.octaves, Some(6));
    }

    #[test]
    fn test_feature_arguments() {
        let args = ProbeArgs::try_parse_from([
            "terra-probe",
            "feature",
            "42",
            "layer",
            "0",
            "radius",
            "--fractal",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Feature {
                id: 42,
                category: "layer".into(),
                layer: 0,
                sub_tag: "radius".into(),
                fractal: true,
            }
        );
    }

    #[test]
    fn test_grid_dimensions_accept_large_values() {
        // Rejected later by the sampler, not by argument parsing.
        let huge = (1_u64 << 40).to_string();
        let huge = huge.as_str();
        let args = ProbeArgs::try_parse_from(["terra-probe", "grid", huge, huge]).unwrap();
        let Command::Grid { width, height, .. } = args.command else {
            panic!("expected grid command");
        };
        assert!(commands::run(&args.command, &Config::default()).is_err());
        assert_eq!((width, height), (1 << 40, 1 << 40));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(ProbeArgs::try_parse_from(["terra-probe"]).is_err());
    }

    #[test]
    fn test_load_config_from_explicit_dir() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = CliArgs {
            seed: Some(77),
            config: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let config = load_config(&overrides).unwrap();
        assert_eq!(config.noise.seed, 77);
        assert!(dir.path().join(terra_config::CONFIG_FILE).exists());
    }
}
