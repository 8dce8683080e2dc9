//! Filter state and the client-side role fallback filter.
//!
//! The upstream API can apply at most one filter dimension per call. When the
//! search and role filters are active simultaneously, the endpoint selector
//! sends the search dimension to the server and the role dimension is applied
//! here, after enrichment.

use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// Role constraint selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoleFilter {
    /// No role constraint.
    #[default]
    All,
    /// Restrict to one application role.
    Only(Role),
}

/// Active filter dimensions for a users query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Free-text search term; blank means no search constraint.
    pub search_term: String,
    /// Role constraint; [`RoleFilter::All`] means unconstrained.
    pub role: RoleFilter,
}

impl FilterState {
    /// Whether a non-blank search term is active.
    #[must_use]
    pub fn has_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Whether a concrete role constraint is active.
    #[must_use]
    pub const fn has_role(&self) -> bool {
        matches!(self.role, RoleFilter::Only(_))
    }
}

/// Apply the client-side role filter for the two-dimension case.
///
/// Only has an effect when both a search term and a concrete role are active:
/// the chosen endpoint already applied the search server-side, so this keeps
/// exact role matches only. With one or zero active dimensions the input is
/// returned unchanged.
#[must_use]
pub fn apply_role_fallback(users: Vec<User>, filters: &FilterState) -> Vec<User> {
    let RoleFilter::Only(role) = filters.role else {
        return users;
    };
    if !filters.has_search() {
        return users;
    }
    users.into_iter().filter(|user| user.role == role).collect()
}
