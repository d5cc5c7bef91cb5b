//! Launchers that start work on a tokio runtime.
//!
//! These let blocking code wait on futures through the same bridge used for
//! callback APIs:
//!
//! ```
//! use std::time::Duration;
//! use sync_bridge::{launch, BridgeError, Deadline, SyncBridge};
//!
//! let runtime = tokio::runtime::Builder::new_multi_thread()
//!     .worker_threads(1)
//!     .build()
//!     .unwrap();
//!
//! let bridge = SyncBridge::default();
//! let value: Result<u32, BridgeError<String>> =
//!     bridge.call(launch::spawn_on(runtime.handle(), async { Ok(7) }));
//! assert_eq!(value, Ok(7));
//! ```
//!
//! The calling thread blocks while it waits. Do not bridge from a thread the
//! target runtime needs in order to make progress (for example from inside a
//! task on a current-thread runtime); the future will not be polled and the
//! call ends in a timeout.

use std::future::Future;

use tokio::runtime::Handle;

use crate::completion::Completion;

/// Launcher that spawns `future` onto `handle` and completes with its result.
///
/// On timeout the spawned task keeps running; its result is discarded.
pub fn spawn_on<T, E, F>(handle: &Handle, future: F) -> impl FnOnce(Completion<T, E>)
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let handle = handle.clone();
    move |done| {
        handle.spawn(async move {
            let result = future.await;
            if !done.complete_result(result) {
                tracing::debug!("Spawned operation finished after the caller stopped waiting");
            }
        });
    }
}

/// Launcher that runs blocking `work` on `handle`'s blocking pool.
pub fn spawn_blocking_on<T, E, W>(handle: &Handle, work: W) -> impl FnOnce(Completion<T, E>)
where
    W: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let handle = handle.clone();
    move |done| {
        handle.spawn_blocking(move || {
            done.complete_result(work());
        });
    }
}
