//! Value types for sync-bridge: the operation's [`Outcome`] and the caller's
//! [`Deadline`].

use std::time::{Duration, Instant};

/// How long a bridged call waits when no deadline is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The single result an asynchronous operation reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The operation produced a value.
    Success(T),
    /// The operation reported a failure.
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// True for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// True for [`Outcome::Failure`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(e) => Err(e),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(e),
        }
    }
}

/// Point in time after which a bridged call stops waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `timeout` from now.
    ///
    /// A timeout too large to represent saturates to roughly 30 years out.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + Duration::from_secs(30 * 365 * 24 * 60 * 60));
        Self { at }
    }

    /// Deadline at an absolute instant.
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    /// The instant this deadline expires.
    pub fn instant(&self) -> Instant {
        self.at
    }

    /// Time left before expiry (zero once elapsed).
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// True once the deadline has passed.
    pub fn has_elapsed(&self) -> bool {
        Instant::now() >= self.at
    }
}

impl Default for Deadline {
    /// [`DEFAULT_TIMEOUT`] from now.
    fn default() -> Self {
        Self::after(DEFAULT_TIMEOUT)
    }
}

impl From<Duration> for Deadline {
    fn from(timeout: Duration) -> Self {
        Self::after(timeout)
    }
}

impl From<Instant> for Deadline {
    fn from(at: Instant) -> Self {
        Self::at(at)
    }
}
