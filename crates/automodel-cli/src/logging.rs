use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Logs go to stderr so the generated module
/// can be piped from stdout. Does nothing if a subscriber is already set.
pub(crate) fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
