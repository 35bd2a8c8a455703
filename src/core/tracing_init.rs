use crate::core::config::LoggingConfig;
use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// sqlx logs every statement at `info`; keep that out of the default output
const QUIET_TARGETS: &str = "sqlx::query=warn";

/// Filter built from the configured level, with statement logging turned down
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(format!("{},{}", config.level, QUIET_TARGETS))
        .with_context(|| format!("Invalid log level '{}'", config.level))
}

/// Install the global subscriber
///
/// `RUST_LOG`, when set and parseable, replaces the configured filter entirely.
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(config)?,
    };

    let console = config.use_console().then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_line_number(true)
    });
    let json = (!config.use_console()).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(json)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
