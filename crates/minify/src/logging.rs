//! Logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `minify=debug`).
pub const LOG_ENV: &str = "MINIFY_LOG";

/// Install a stderr subscriber. `verbose` forces `debug` level.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
