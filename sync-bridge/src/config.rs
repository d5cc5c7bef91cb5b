//! Configuration loading for sync-bridge.
//!
//! A [`BridgeConfig`] can be built in code or loaded from a TOML file:
//!
//! ```toml
//! timeout_ms = 2500
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::DEFAULT_TIMEOUT;

/// Configuration for a [`SyncBridge`](crate::SyncBridge).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeConfig {
    /// How long a call waits for its outcome, in milliseconds (default: 10000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl BridgeConfig {
    /// Config with the given wait timeout.
    ///
    /// Sub-millisecond precision is truncated.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// The wait timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the configuration.
    ///
    /// A zero timeout would turn every call into an immediate timeout, so it
    /// is rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        tracing::debug!("Loaded bridge config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_waits_ten_seconds() {
        let config = BridgeConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_from_toml_string() {
        let config =
            BridgeConfig::from_toml_str("timeout_ms = 2500\n", Path::new("inline")).unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn config_missing_fields_use_defaults() {
        let config = BridgeConfig::from_toml_str("", Path::new("inline")).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = BridgeConfig::from_toml_str("timeout_ms = 0", Path::new("inline")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn malformed_toml_reports_origin() {
        let err = BridgeConfig::from_toml_str("timeout_ms = \"soon\"", Path::new("bridge.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("bridge.toml"));
    }

    #[test]
    fn with_timeout_truncates_to_millis() {
        let config = BridgeConfig::with_timeout(Duration::from_micros(1500));
        assert_eq!(config.timeout_ms, 1);
    }

    #[test]
    fn config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms = 750").unwrap();

        let config = BridgeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(750));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = BridgeConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
