//! Completion callbacks and the wait handle behind them.
//!
//! A [`WaitHandle`] owns one outcome slot guarded by a mutex and a condition
//! variable. The [`Completion`] given to the operation shares that slot, so it
//! stays valid no matter when (or whether) the operation calls back.
//!
//! The slot moves through three states:
//!
//! ```text
//! Pending ──complete()──▶ Resolved ──wait() returns──▶ Closed
//!    │                                                    ▲
//!    └──────────────── deadline / drop ───────────────────┘
//! ```
//!
//! Only the first completion is stored. Anything after that, including a
//! completion that arrives once the caller has stopped waiting, is dropped
//! and reported back to the completer as `false`.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::types::{Deadline, Outcome};

enum Slot<T, E> {
    Pending,
    Resolved(Outcome<T, E>),
    Closed,
}

struct Shared<T, E> {
    slot: Mutex<Slot<T, E>>,
    signal: Condvar,
}

/// Per-call wait primitive. Created fresh for every bridged call.
pub(crate) struct WaitHandle<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> WaitHandle<T, E> {
    pub(crate) fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::Pending),
                signal: Condvar::new(),
            }),
        }
    }

    /// A completion callback that resolves this handle.
    pub(crate) fn completion(&self) -> Completion<T, E> {
        Completion {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Block until an outcome arrives or `deadline` passes.
    ///
    /// The slot is read under the lock after the wait returns, so an outcome
    /// stored right at the deadline is still returned. The slot is closed
    /// before the lock is released; later completions become no-ops.
    pub(crate) fn wait(self, deadline: Deadline) -> Option<Outcome<T, E>> {
        let mut slot = self.shared.slot.lock();
        while matches!(*slot, Slot::Pending) {
            if self
                .shared
                .signal
                .wait_until(&mut slot, deadline.instant())
                .timed_out()
            {
                break;
            }
        }
        match std::mem::replace(&mut *slot, Slot::Closed) {
            Slot::Resolved(outcome) => Some(outcome),
            Slot::Pending | Slot::Closed => None,
        }
    }
}

impl<T, E> Drop for WaitHandle<T, E> {
    fn drop(&mut self) {
        // Covers a launcher that panicked before wait() ran.
        let mut slot = self.shared.slot.lock();
        if !matches!(*slot, Slot::Closed) {
            *slot = Slot::Closed;
        }
    }
}

/// Completion callback handed to an operation launcher.
///
/// Cheap to clone and safe to call from any thread. The first call to
/// [`complete`](Completion::complete) (or one of its shorthands) delivers the
/// outcome; every later call returns `false` and has no effect.
pub struct Completion<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Completion<T, E> {
    /// Deliver the operation's outcome.
    ///
    /// Returns `true` if this call resolved the bridged call, `false` if an
    /// outcome was already delivered or the caller stopped waiting.
    pub fn complete(&self, outcome: Outcome<T, E>) -> bool {
        let mut slot = self.shared.slot.lock();
        match &*slot {
            Slot::Pending => {}
            Slot::Resolved(_) => {
                tracing::debug!("duplicate completion ignored");
                return false;
            }
            Slot::Closed => {
                tracing::debug!("completion arrived after the caller stopped waiting");
                return false;
            }
        }
        *slot = Slot::Resolved(outcome);
        drop(slot);
        self.shared.signal.notify_one();
        true
    }

    /// Shorthand for `complete(Outcome::Success(value))`.
    pub fn succeed(&self, value: T) -> bool {
        self.complete(Outcome::Success(value))
    }

    /// Shorthand for `complete(Outcome::Failure(error))`.
    pub fn fail(&self, error: E) -> bool {
        self.complete(Outcome::Failure(error))
    }

    /// Deliver a standard `Result` as the outcome.
    pub fn complete_result(&self, result: Result<T, E>) -> bool {
        self.complete(result.into())
    }

    /// True once an outcome was delivered or the caller stopped waiting.
    pub fn is_resolved(&self) -> bool {
        !matches!(*self.shared.slot.lock(), Slot::Pending)
    }

    /// Turn this handle into a plain callback closure, for APIs that take an
    /// `Fn(Outcome<T, E>)` rather than a [`Completion`].
    pub fn into_fn(self) -> impl Fn(Outcome<T, E>) + Clone + Send + Sync + 'static
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        move |outcome| {
            self.complete(outcome);
        }
    }
}

impl<T, E> Clone for Completion<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for Completion<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn completion_is_send_and_sync() {
        assert_send_sync::<Completion<Vec<u8>, String>>();
    }

    #[test]
    fn first_completion_wins() {
        let handle: WaitHandle<u32, String> = WaitHandle::new();
        let completion = handle.completion();

        assert!(completion.succeed(1));
        assert!(!completion.succeed(2));
        assert!(!completion.fail("late".to_string()));

        let outcome = handle.wait(Deadline::after(Duration::from_millis(50)));
        assert_eq!(outcome, Some(Outcome::Success(1)));
    }

    #[test]
    fn completion_after_wait_is_ignored() {
        let handle: WaitHandle<u32, String> = WaitHandle::new();
        let completion = handle.completion();

        let outcome = handle.wait(Deadline::after(Duration::from_millis(10)));
        assert_eq!(outcome, None);
        assert!(completion.is_resolved());
        assert!(!completion.succeed(5));
    }

    #[test]
    fn completion_after_handle_dropped_is_ignored() {
        let handle: WaitHandle<u32, String> = WaitHandle::new();
        let completion = handle.completion();
        drop(handle);

        assert!(!completion.fail("gone".to_string()));
    }

    #[test]
    fn wait_wakes_on_completion_from_other_thread() {
        let handle: WaitHandle<String, ()> = WaitHandle::new();
        let completion = handle.completion();

        let worker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            completion.succeed("done".to_string())
        });

        let outcome = handle.wait(Deadline::after(Duration::from_secs(5)));
        assert_eq!(outcome, Some(Outcome::Success("done".to_string())));
        assert!(worker.join().unwrap());
    }

    #[test]
    fn resolved_before_wait_returns_immediately_even_past_deadline() {
        let handle: WaitHandle<u32, String> = WaitHandle::new();
        handle.completion().fail("early".to_string());

        let outcome = handle.wait(Deadline::after(Duration::ZERO));
        assert_eq!(outcome, Some(Outcome::Failure("early".to_string())));
    }

    #[test]
    fn into_fn_delivers_outcome() {
        let handle: WaitHandle<u32, String> = WaitHandle::new();
        let callback = handle.completion().into_fn();
        let second = callback.clone();

        callback(Outcome::Success(9));
        second(Outcome::Success(10));

        assert_eq!(
            handle.wait(Deadline::after(Duration::from_millis(50))),
            Some(Outcome::Success(9))
        );
    }

    #[test]
    fn debug_shows_resolution_state() {
        let handle: WaitHandle<u32, String> = WaitHandle::new();
        let completion = handle.completion();
        assert_eq!(format!("{:?}", completion), "Completion { resolved: false }");
        completion.succeed(1);
        assert_eq!(format!("{:?}", completion), "Completion { resolved: true }");
    }
}
