//! Logging and tracing initialization.
//!
//! A bare level such as `"debug"` applies to Cutline's own crates only;
//! everything else stays at `warn`. Full filter strings are used as given.

use crate::config::LoggingConfig;

/// Target prefix shared by every Cutline crate (`cutline_edit_engine`, ...).
const CUTLINE_TARGET: &str = "cutline";

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Expand a configured level into `EnvFilter` directives.
fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return format!("warn,{CUTLINE_TARGET}=info");
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("warn,{CUTLINE_TARGET}={level}")
}
