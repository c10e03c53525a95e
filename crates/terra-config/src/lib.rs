//! Configuration for terra tools.
//!
//! Settings persist as `config.ron`, tolerate missing and unknown fields, and
//! can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, Config, DebugConfig, FeatureConfig, NoiseConfig, default_config_dir,
};
pub use error::ConfigError;
