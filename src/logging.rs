//! Diagnostic logging to stderr.
//!
//! Filter priority: `RUST_LOG` > `--verbose` > configured level > `warn`.
//! The API key and file contents are never logged.

use tracing_subscriber::EnvFilter;

use crate::env::Env;

/// Default filter when nothing else is configured.
pub const DEFAULT_LEVEL: &str = "warn";

/// Resolve the filter directive string.
pub fn filter_directive(
    rust_log: Option<&str>,
    verbose: u8,
    config_level: Option<&str>,
) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive.to_string();
    }
    match verbose {
        0 => config_level.unwrap_or(DEFAULT_LEVEL).to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(env: &Env, verbose: u8, config_level: Option<&str>) {
    let rust_log = env.var("RUST_LOG");
    let directive = filter_directive(rust_log.as_deref(), verbose, config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();

    tracing::debug!(
        app = crate::constants::APP_NAME,
        version = crate::constants::VERSION,
        "logging initialised"
    );
}
