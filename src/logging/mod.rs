//! Global `tracing` subscriber setup.

use crate::config::{LogConfig, LogFormat};
use crate::error::{IgnitorError, Result};
use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber described by `config`.
///
/// `config.level` is an `EnvFilter` directive. Fails if a global subscriber is
/// already set.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level).map_err(|e| {
        IgnitorError::Internal(format!("Invalid log filter '{}': {}", config.level, e))
    })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    installed.map_err(|e| IgnitorError::Internal(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filters() {
        let config = LogConfig {
            level: "ignitor=[".to_string(),
            format: LogFormat::Text,
        };
        assert!(matches!(init(&config), Err(IgnitorError::Internal(_))));
    }
}
