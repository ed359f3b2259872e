//! Logging Infrastructure
//!
//! Structured logging setup for development and production:
//! - Pretty console output for development
//! - JSON console output for production (one event per line)
//!
//! `RUST_LOG` always takes precedence over the configured level.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "pricing_engine=trace")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
///
/// Fails if a global subscriber is already installed.
///
/// # Examples
/// ```no_run
/// pricing_engine::init_logger("debug", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry();

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter);
        subscriber.with(console_layer).try_init()?;
    }

    tracing::debug!(level, json_format, "Logger initialized");
    Ok(())
}

/// Test logger: writes through the test harness capture, ignores repeat calls
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("trace"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        init_test_logger();
        assert!(init_logger("info", false).is_err());
        assert!(init_logger("info", true).is_err());
    }
}
