//! Upstream endpoint selection for a users query.
//!
//! Pure path construction, no I/O. The upstream API exposes three listing
//! endpoints and can apply at most one filter dimension per call, so the
//! selector picks one by priority: search, then role filter, then the plain
//! listing. The losing dimension, if any, is handled client-side by
//! [`apply_role_fallback`](super::filters::apply_role_fallback).

use pagination::PageWindow;
use url::form_urlencoded;

use super::filters::{FilterState, RoleFilter};
use super::user::Role;

/// The upstream resource chosen for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `/users/search` with the free-text term.
    Search {
        /// Search term as typed (encoding happens during rendering).
        term: String,
    },
    /// `/users/filter` constrained to one role.
    RoleFilter {
        /// Role to filter by, mapped to upstream vocabulary when rendered.
        role: Role,
    },
    /// Unfiltered `/users` listing.
    Listing,
}

/// Choose the upstream endpoint for the active filters.
///
/// Priority, first match wins: non-blank search term, then a concrete role
/// constraint, then the default listing.
#[must_use]
pub fn select_endpoint(filters: &FilterState) -> Endpoint {
    if filters.has_search() {
        return Endpoint::Search {
            term: filters.search_term.clone(),
        };
    }
    if let RoleFilter::Only(role) = filters.role {
        return Endpoint::RoleFilter { role };
    }
    Endpoint::Listing
}

impl Endpoint {
    /// Render the path and query string for this endpoint and window.
    ///
    /// The search term is URL-encoded; `limit` and `skip` are always present.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::Endpoint;
    /// use pagination::PageWindow;
    ///
    /// let path = Endpoint::Search { term: "ada".to_owned() }
    ///     .path_and_query(PageWindow { limit: 20, skip: 40 });
    /// assert_eq!(path, "/users/search?q=ada&limit=20&skip=40");
    /// ```
    #[must_use]
    pub fn path_and_query(&self, window: PageWindow) -> String {
        let limit = window.limit.to_string();
        let skip = window.skip.to_string();
        match self {
            Self::Search { term } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", term)
                    .append_pair("limit", &limit)
                    .append_pair("skip", &skip)
                    .finish();
                format!("/users/search?{query}")
            }
            Self::RoleFilter { role } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("key", "role")
                    .append_pair("value", role.upstream_value())
                    .append_pair("limit", &limit)
                    .append_pair("skip", &skip)
                    .finish();
                format!("/users/filter?{query}")
            }
            Self::Listing => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("limit", &limit)
                    .append_pair("skip", &skip)
                    .finish();
                format!("/users?{query}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const WINDOW: PageWindow = PageWindow { limit: 10, skip: 20 };

    fn filters(search: &str, role: RoleFilter) -> FilterState {
        FilterState {
            search_term: search.to_owned(),
            role,
        }
    }

    #[test]
    fn search_wins_over_role_filter() {
        let endpoint = select_endpoint(&filters("ada", RoleFilter::Only(Role::Admin)));
        let path = endpoint.path_and_query(WINDOW);
        assert!(
            path.starts_with("/users/search"),
            "search must take priority: {path}"
        );
    }

    #[test]
    fn blank_search_falls_through_to_role_filter() {
        let endpoint = select_endpoint(&filters("   ", RoleFilter::Only(Role::Editor)));
        assert_eq!(
            endpoint.path_and_query(WINDOW),
            "/users/filter?key=role&value=moderator&limit=10&skip=20"
        );
    }

    #[test]
    fn no_filters_selects_the_listing() {
        let endpoint = select_endpoint(&filters("", RoleFilter::All));
        assert_eq!(endpoint.path_and_query(WINDOW), "/users?limit=10&skip=20");
    }

    #[rstest]
    #[case::admin(Role::Admin, "admin")]
    #[case::editor(Role::Editor, "moderator")]
    #[case::viewer(Role::Viewer, "user")]
    fn role_filter_uses_upstream_vocabulary(#[case] role: Role, #[case] value: &str) {
        let endpoint = select_endpoint(&filters("", RoleFilter::Only(role)));
        let path = endpoint.path_and_query(WINDOW);
        assert!(path.contains(&format!("value={value}")), "path: {path}");
    }

    #[test]
    fn search_terms_are_url_encoded() {
        let endpoint = select_endpoint(&filters("ada lovelace&co", RoleFilter::All));
        assert_eq!(
            endpoint.path_and_query(WINDOW),
            "/users/search?q=ada+lovelace%26co&limit=10&skip=20"
        );
    }
}
