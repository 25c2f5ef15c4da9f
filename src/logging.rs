//! Logger initialization
//!
//! The library only talks to the `log` facade; binaries call
//! `init_logging` once at startup to install `env_logger`.

use std::sync::Once;

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` filter syntax; falls back to `RUST_LOG`, then "info"
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        // Another logger may already be installed (tests, embedding hosts)
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging(LoggingConfig {
            env_filter: Some("warn".to_string()),
        });
        init_logging(LoggingConfig::default());
        log::warn!("still alive");
    }
}
