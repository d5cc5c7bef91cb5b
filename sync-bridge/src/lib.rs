//! # sync-bridge
//!
//! Turns a callback-completed asynchronous operation into a blocking call
//! with a deadline.
//!
//! The caller hands over a *launcher*: a closure that starts the work and
//! passes it a [`Completion`]. The bridge blocks the current thread until the
//! work reports an [`Outcome`] or the [`Deadline`] passes, then returns
//! `Ok(value)`, [`BridgeError::Operation`] or [`BridgeError::Timeout`].
//!
//! ## Design
//!
//! - One wait handle per call (mutex + condvar); no global state
//! - First completion wins, later ones are ignored
//! - A captured failure beats a timeout
//! - Timeouts do not cancel anything: the operation keeps running and its
//!   late result is dropped

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bridge;
pub mod completion;
pub mod config;
pub mod error;
pub mod launch;
pub mod types;

pub use bridge::{await_completion, await_completion_until, SyncBridge};
pub use completion::Completion;
pub use config::BridgeConfig;
pub use error::{BridgeError, ConfigError};
pub use types::{Deadline, Outcome, DEFAULT_TIMEOUT};
