//! Dashboard session: the composition root for one users view.
//!
//! Owns the filter and pagination state, the search debouncer, and the query
//! orchestrator, and turns UI interactions into dependency-key changes. Role
//! and page changes take effect immediately; search input only becomes part
//! of the dependency key once the debounce window elapses, so a burst of
//! keystrokes produces at most one fetch for the final combined state.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use pagination::{Page, Pager, PagerError};
use tokio::sync::watch;

use crate::config::DashboardConfig;

use super::debounce::Debouncer;
use super::filters::{FilterState, RoleFilter};
use super::pipeline::fetch_user_page;
use super::ports::UserPageSource;
use super::query::{QueryOrchestrator, QueryState};
use super::user::User;

/// Dependency key for one users fetch: the debounced search term, the role
/// constraint, and the pagination window.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryKey {
    search_term: String,
    role: RoleFilter,
    window: pagination::PageWindow,
}

struct SessionState {
    /// Search text as typed, before debouncing.
    search_input: String,
    /// Search term that last cleared the debounce window.
    debounced_search: String,
    role: RoleFilter,
    pager: Pager,
}

/// Orchestrated state for one users dashboard view.
///
/// Create inside a Tokio runtime and call [`DashboardSession::refresh`] once
/// for the initial load; afterwards every mutator triggers its own fetch as
/// needed.
pub struct DashboardSession {
    source: Arc<dyn UserPageSource>,
    debouncer: Debouncer,
    orchestrator: QueryOrchestrator<QueryKey, Page<User>>,
    state: Mutex<SessionState>,
}

impl DashboardSession {
    /// Build a session over `source` with the configured page size and
    /// debounce window.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::ZeroPageSize`] when the configured page size is
    /// zero.
    pub fn new(
        config: &DashboardConfig,
        source: Arc<dyn UserPageSource>,
    ) -> Result<Arc<Self>, PagerError> {
        Ok(Arc::new(Self {
            source,
            debouncer: Debouncer::new(config.debounce),
            orchestrator: QueryOrchestrator::new(),
            state: Mutex::new(SessionState {
                search_input: String::new(),
                debounced_search: String::new(),
                role: RoleFilter::All,
                pager: Pager::new(config.items_per_page)?,
            }),
        }))
    }

    /// Snapshot of the observable query state.
    #[must_use]
    pub fn query_state(&self) -> QueryState<Page<User>> {
        self.orchestrator.state()
    }

    /// Subscribe to query state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState<Page<User>>> {
        self.orchestrator.subscribe()
    }

    /// Whether the live input or the role constrains the result set.
    ///
    /// Uses the *live* search text, not the debounced one, so the UI can show
    /// a clear affordance as soon as the user types.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        !state.search_input.is_empty() || state.role != RoleFilter::All
    }

    /// Current 1-based page number.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pager
            .current_page()
    }

    /// Record new search input and schedule it through the debouncer.
    ///
    /// Intermediate values never trigger a fetch; when the idle window
    /// elapses, a changed term resets pagination and refreshes.
    pub fn set_search_term(self: &Arc<Self>, term: impl Into<String>) {
        let term = term.into();
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.search_input.clone_from(&term);
        }
        let session = Arc::downgrade(self);
        self.debouncer.schedule(term, move |value| {
            if let Some(session) = Weak::upgrade(&session) {
                session.apply_debounced_search(value);
            }
        });
    }

    /// Constrain or unconstrain the role dimension. Takes effect immediately:
    /// a changed role resets pagination and refreshes without debouncing.
    pub fn set_role_filter(&self, role: RoleFilter) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.role == role {
                return;
            }
            state.role = role;
            state.pager.reset();
        }
        self.refresh();
    }

    /// Navigate to `page` (clamped to 1) and refresh.
    pub fn go_to_page(&self, page: u32) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.pager.go_to_page(page);
        }
        self.refresh();
    }

    /// Reset both filter dimensions and pagination.
    ///
    /// The search term travels through the debouncer like any other input, so
    /// the role reset may fetch with the previous debounced term first and
    /// the cleared term settles one debounce window later.
    pub fn clear_filters(self: &Arc<Self>) {
        self.set_search_term(String::new());
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.role = RoleFilter::All;
            state.pager.reset();
        }
        self.refresh();
    }

    /// Run the pipeline for the current dependency key, superseding any
    /// in-flight fetch. A no-op when the key is unchanged and the last fetch
    /// settled successfully; after a failure, calling this again with the
    /// same key retries it.
    pub fn refresh(&self) {
        let (key, filters, window) = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let filters = FilterState {
                search_term: state.debounced_search.clone(),
                role: state.role,
            };
            let window = state.pager.window();
            let key = QueryKey {
                search_term: state.debounced_search.clone(),
                role: state.role,
                window,
            };
            (key, filters, window)
        };

        let source = Arc::clone(&self.source);
        self.orchestrator.run(key, move |cancel| async move {
            fetch_user_page(source.as_ref(), &filters, window, cancel).await
        });
    }

    fn apply_debounced_search(&self, term: String) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.debounced_search == term {
                return;
            }
            state.debounced_search = term;
            state.pager.reset();
        }
        self.refresh();
    }
}
