//! Domain core: normalization, filtering, endpoint selection, and query
//! orchestration for the users dashboard.
//!
//! Everything here is transport-agnostic; network I/O happens behind the
//! [`UserPageSource`] port implemented under `outbound`.

pub mod debounce;
pub mod endpoint;
pub mod enrichment;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod ports;
pub mod query;
pub mod session;
pub mod user;

pub use self::debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use self::endpoint::{Endpoint, select_endpoint};
pub use self::enrichment::{RawUser, RawUserPage, enrich};
pub use self::error::FetchError;
pub use self::filters::{FilterState, RoleFilter, apply_role_fallback};
pub use self::pipeline::fetch_user_page;
pub use self::ports::UserPageSource;
pub use self::query::{QueryOrchestrator, QueryState};
pub use self::session::DashboardSession;
pub use self::user::{Address, Company, Role, User, UserStatus};
