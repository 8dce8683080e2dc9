//! Generic cancellable query orchestration.
//!
//! [`QueryOrchestrator`] coordinates one logical query slot: every
//! dependency-key change cancels whatever is in flight, starts a fresh
//! operation, and guarantees that at most one operation's result is ever
//! committed per generation — a superseded operation never writes to state,
//! even if it settles later. Observable state lives in a `watch` channel so
//! consumers can either snapshot it or subscribe to transitions.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::FetchError;

/// Observable phase of one query slot.
///
/// `data` and `error` are sticky across reloads: a new operation clears the
/// error but leaves the previous data visible until its own result lands, so
/// consumers never flash to empty during a reload, and a failed reload keeps
/// stale data on screen next to the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<T> {
    /// Last committed result, if any.
    pub data: Option<T>,
    /// Last committed failure, if any.
    pub error: Option<FetchError>,
    /// Whether an operation is currently in flight.
    pub is_loading: bool,
}

impl<T> Default for QueryState<T> {
    /// Initial state: nothing committed yet, first load pending.
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: true,
        }
    }
}

struct Slot<K> {
    last_key: Option<K>,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

/// Cancellable async fetch coordinator, generic over the dependency key `K`
/// and the committed result `T`.
pub struct QueryOrchestrator<K, T> {
    slot: Arc<Mutex<Slot<K>>>,
    state: watch::Sender<QueryState<T>>,
}

impl<K, T> QueryOrchestrator<K, T>
where
    K: PartialEq + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create an orchestrator with an empty slot and pristine state.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            slot: Arc::new(Mutex::new(Slot {
                last_key: None,
                generation: 0,
                in_flight: None,
            })),
            state,
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    /// Subscribe to state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }

    /// Run `fetcher` for `key`, superseding any in-flight operation.
    ///
    /// A repeated key is a no-op and returns `false` — the slot only reacts
    /// to dependency-key *changes*. Otherwise the previous operation's token
    /// is cancelled, `is_loading` is raised, the previous error is cleared
    /// (data stays visible), and the fetcher runs with a fresh token. The
    /// settled result commits only while its generation is still current; a
    /// cancellation outcome commits nothing.
    ///
    /// A settle with an error releases the key dedup, so running the same
    /// key again retries the operation. Retry is always a caller action;
    /// nothing here retries automatically.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn run<F, Fut>(&self, key: K, fetcher: F) -> bool
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let generation = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.last_key.as_ref() == Some(&key) {
                return false;
            }
            if let Some(previous) = slot.in_flight.take() {
                previous.cancel();
            }
            slot.last_key = Some(key);
            slot.generation += 1;
            slot.in_flight = Some(token.clone());
            slot.generation
        };

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let operation = fetcher(token.clone());
        let slot = Arc::clone(&self.slot);
        let state = self.state.clone();
        tokio::spawn(async move {
            let result = operation.await;

            {
                let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                if slot.generation != generation {
                    debug!(generation, "discarding superseded query result");
                    return;
                }
                slot.in_flight = None;
                // A failed settle releases the dedup so the caller can retry
                // by re-running the same key.
                if matches!(result, Err(ref error) if !error.is_cancellation()) {
                    slot.last_key = None;
                }
            }

            match result {
                Err(error) if error.is_cancellation() => {
                    debug!(generation, "discarding cancelled query result");
                }
                Ok(data) => {
                    state.send_modify(|current| {
                        current.data = Some(data);
                        current.error = None;
                        current.is_loading = false;
                    });
                }
                Err(error) => {
                    warn!(%error, generation, "query operation failed");
                    state.send_modify(|current| {
                        current.error = Some(error);
                        current.is_loading = false;
                    });
                }
            }
        });
        true
    }
}

impl<K, T> Default for QueryOrchestrator<K, T>
where
    K: PartialEq + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Drop for QueryOrchestrator<K, T> {
    /// Teardown cancels any pending operation and bumps the generation so a
    /// late settle can never commit.
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.generation += 1;
        if let Some(token) = slot.in_flight.take() {
            token.cancel();
        }
    }
}
