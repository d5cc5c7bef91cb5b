//! SyncBridge — blocking calls over callback-completed operations.
//!
//! # Example
//!
//! ```
//! use std::thread;
//! use std::time::Duration;
//! use sync_bridge::{await_completion_until, BridgeError, Deadline};
//!
//! let result: Result<u32, BridgeError<String>> = await_completion_until(
//!     |done| {
//!         thread::spawn(move || {
//!             done.succeed(42);
//!         });
//!     },
//!     Deadline::after(Duration::from_secs(1)),
//! );
//! assert_eq!(result, Ok(42));
//! ```
//!
//! A timeout only stops the wait. The operation keeps running and its
//! eventual completion is discarded.

use std::time::Duration;

use crate::completion::{Completion, WaitHandle};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, ConfigError};
use crate::types::{Deadline, Outcome, DEFAULT_TIMEOUT};

/// Run `launcher` and block until it completes, waiting at most
/// [`DEFAULT_TIMEOUT`].
///
/// See [`await_completion_until`].
pub fn await_completion<T, E, L>(launcher: L) -> Result<T, BridgeError<E>>
where
    L: FnOnce(Completion<T, E>),
{
    await_completion_until(launcher, Deadline::default())
}

/// Run `launcher` and block until it completes or `deadline` passes.
///
/// `launcher` receives the completion callback and must only *start* the
/// work; it runs on the calling thread before the wait begins.
///
/// # Errors
///
/// - [`BridgeError::Operation`] if the operation completed with a failure,
///   including a failure that lands as the deadline expires.
/// - [`BridgeError::Timeout`] if nothing was delivered in time.
pub fn await_completion_until<T, E, L>(launcher: L, deadline: Deadline) -> Result<T, BridgeError<E>>
where
    L: FnOnce(Completion<T, E>),
{
    let handle = WaitHandle::new();
    launcher(handle.completion());

    tracing::trace!(
        "Waiting for completion ({}ms left)",
        deadline.remaining().as_millis()
    );

    match handle.wait(deadline) {
        Some(Outcome::Failure(e)) => {
            tracing::trace!("Operation completed with failure");
            Err(BridgeError::Operation(e))
        }
        Some(Outcome::Success(value)) => {
            tracing::trace!("Operation completed successfully");
            Ok(value)
        }
        None => {
            tracing::debug!("Timed out waiting for completion");
            Err(BridgeError::Timeout)
        }
    }
}

/// Reusable bridge carrying a configured timeout.
///
/// Holds no per-call state; one `SyncBridge` can serve any number of
/// concurrent calls from different threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncBridge {
    timeout: Duration,
}

impl SyncBridge {
    /// Create a bridge from configuration.
    pub fn new(config: &BridgeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            timeout: config.timeout(),
        })
    }

    /// Replace the wait timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The wait timeout applied by [`call`](Self::call).
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `launcher`, waiting at most this bridge's timeout.
    pub fn call<T, E, L>(&self, launcher: L) -> Result<T, BridgeError<E>>
    where
        L: FnOnce(Completion<T, E>),
    {
        await_completion_until(launcher, Deadline::after(self.timeout))
    }

    /// Run `launcher` against an explicit deadline, ignoring the configured
    /// timeout.
    pub fn call_until<T, E, L>(&self, launcher: L, deadline: Deadline) -> Result<T, BridgeError<E>>
    where
        L: FnOnce(Completion<T, E>),
    {
        await_completion_until(launcher, deadline)
    }
}

impl Default for SyncBridge {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
