//! Diagnostic logging to standard error.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "DUPCHECK_LOG";

/// Installs the global subscriber.
///
/// `verbosity` comes from repeated `-v` flags and overrides `DUPCHECK_LOG`:
/// one selects debug events, two or more select trace events. Without either
/// only warnings are shown. A second call is a no-op.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("dupcheck=debug"),
        _ => EnvFilter::new("dupcheck=trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
