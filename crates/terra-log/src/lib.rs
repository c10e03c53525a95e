//! Structured logging for terra tools via the `tracing` ecosystem.
//!
//! Console output goes to stderr so stdout stays free for machine-readable
//! results. Debug builds can also write a JSON log file.

use std::fs::File;
use std::path::Path;

use terra_config::Config;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Filter used when neither `RUST_LOG` nor the config supplies one.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log inside `log_dir`.
pub const LOG_FILE: &str = "terra.log";

/// Pick the filter directive: the config's `debug.log_level` when set,
/// otherwise [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> &str {
    config
        .map(|c| c.debug.log_level.as_str())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
}

/// Build the event filter. `RUST_LOG` takes precedence over
/// [`filter_directive`].
pub fn env_filter(config: Option<&Config>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(config)))
}

/// Open `log_dir/terra.log` for the JSON layer.
///
/// Returns `None` outside debug builds, without a directory, or when the file
/// cannot be created; logging then stays console-only.
pub fn json_log_file(log_dir: Option<&Path>, debug_build: bool) -> Option<File> {
    if !debug_build {
        return None;
    }
    let log_dir = log_dir?;
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE)).ok()
}

/// Install the global tracing subscriber: human-readable events on stderr,
/// plus JSON lines in [`json_log_file`] when one is available.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// ```no_run
/// use terra_config::Config;
/// use terra_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some("./logs".as_ref()), cfg!(debug_assertions), Some(&config))
///     .expect("logging already initialized");
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<(), TryInitError> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_timer(fmt::time::uptime());

    let file_layer = json_log_file(log_dir, debug_build).map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_timer(fmt::time::uptime())
            .json()
    });

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console_layer)
        .with(file_layer)
        .try_init()
}
