//! Single-slot debounce timer.
//!
//! Text input produces a burst of values; only the value present when the
//! idle window elapses should become a dependency-key change. The debouncer
//! owns exactly one pending timer: scheduling a new value cancels the pending
//! one, so intermediate values are never delivered.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Default idle window before a scheduled value fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Single-slot timer that delivers only the most recently scheduled value.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    /// Create a debouncer with the given idle window.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `value` for delivery after the idle window, cancelling any
    /// previously pending delivery. `on_fire` runs at most once, on the
    /// runtime's timer task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<T, F>(&self, value: T, on_fire: F)
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        let token = CancellationToken::new();
        {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = pending.take() {
                previous.cancel();
            }
            *pending = Some(token.clone());
        }

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => on_fire(value),
            }
        });
    }

    /// Drop any pending delivery without firing it.
    pub fn cancel_pending(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = pending.take() {
            token.cancel();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
