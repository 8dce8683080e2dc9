//! Query-orchestration and data-normalization core for a paginated user
//! directory dashboard.
//!
//! The crate decides which upstream endpoint to call, debounces search input,
//! cancels superseded in-flight requests, reconciles pagination with active
//! filters, normalizes raw upstream records into a stable domain shape, and
//! applies a client-side fallback when the upstream API cannot satisfy two
//! filter dimensions at once. Presentation is an external collaborator: it
//! observes [`domain::QueryState`] and drives [`domain::DashboardSession`].

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::DashboardConfig;
pub use domain::{DashboardSession, FetchError, QueryState};
