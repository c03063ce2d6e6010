//! Log output for the command line.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter (e.g., `GDCONST_LOG=debug`).
pub const LOG_ENV: &str = "GDCONST_LOG";

/// Filter used when `GDCONST_LOG` is not set.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so reports stay clean.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
}
