//! Error types for sync-bridge.
//!
//! The bridge adds exactly one failure of its own ([`BridgeError::Timeout`]).
//! Everything else is the wrapped operation's error, passed through untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from a bridged call.
///
/// `E` is whatever failure type the wrapped operation reports.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError<E> {
    /// The operation completed with a failure.
    #[error("operation failed: {0}")]
    Operation(E),

    /// No outcome arrived before the deadline.
    #[error("timed out waiting for completion")]
    Timeout,
}

impl<E> BridgeError<E> {
    /// True if the bridge gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BridgeError::Timeout)
    }

    /// Borrow the operation's own error, if that is what failed.
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            BridgeError::Operation(e) => Some(e),
            BridgeError::Timeout => None,
        }
    }

    /// Take the operation's own error, if that is what failed.
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            BridgeError::Operation(e) => Some(e),
            BridgeError::Timeout => None,
        }
    }

    /// Map the operation error, leaving a timeout as is.
    pub fn map_operation<F, O>(self, f: O) -> BridgeError<F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            BridgeError::Operation(e) => BridgeError::Operation(f(e)),
            BridgeError::Timeout => BridgeError::Timeout,
        }
    }
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },

    /// Timeout value is unusable.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}
