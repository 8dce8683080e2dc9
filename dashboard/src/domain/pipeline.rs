//! Fetch pipeline composing endpoint selection, transport, enrichment,
//! client-side filtering, and ordering.
//!
//! The pipeline is the only suspension point in the query path: everything
//! around the port call is pure. The envelope passes the server-reported
//! `total`/`skip`/`limit` through unchanged, even when the role fallback
//! removes items — the displayed range reflects the server window by design.

use std::cmp::Ordering;

use pagination::{Page, PageWindow};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::endpoint::select_endpoint;
use super::enrichment::enrich;
use super::error::FetchError;
use super::filters::{FilterState, apply_role_fallback};
use super::ports::UserPageSource;
use super::user::User;

/// Fetch, normalize, filter, and order one page of users.
///
/// # Errors
///
/// Propagates the port's [`FetchError`] verbatim; the pure stages never fail.
pub async fn fetch_user_page(
    source: &dyn UserPageSource,
    filters: &FilterState,
    window: PageWindow,
    cancel: CancellationToken,
) -> Result<Page<User>, FetchError> {
    let endpoint = select_endpoint(filters);
    debug!(?endpoint, ?window, "dispatching users fetch");

    let raw = source.fetch_page(endpoint, window, cancel).await?;
    let users = enrich(raw.users);
    let mut users = apply_role_fallback(users, filters);
    users.sort_by(|a, b| compare_names(&a.name, &b.name));

    Ok(Page {
        items: users,
        total: raw.total,
        skip: raw.skip,
        limit: raw.limit,
    })
}

/// Case-insensitive name ordering, falling back to case-sensitive order for
/// ties so the result is deterministic. `sort_by` is stable, so records with
/// fully equal names keep their enriched order.
fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    if folded == Ordering::Equal {
        a.cmp(b)
    } else {
        folded
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::domain::enrichment::RawUserPage;
    use crate::domain::filters::RoleFilter;
    use crate::domain::user::{Role, UserStatus};

    const WINDOW: PageWindow = PageWindow { limit: 20, skip: 0 };

    /// Deterministic source returning a canned page regardless of endpoint.
    struct FixtureSource {
        page: RawUserPage,
    }

    impl FixtureSource {
        fn new(users: serde_json::Value, total: u64) -> Self {
            let page = serde_json::from_value(json!({
                "users": users,
                "total": total,
                "skip": 0,
                "limit": 20,
            }))
            .expect("fixture page should decode");
            Self { page }
        }
    }

    #[async_trait]
    impl UserPageSource for FixtureSource {
        async fn fetch_page(
            &self,
            _endpoint: crate::domain::Endpoint,
            _window: PageWindow,
            _cancel: CancellationToken,
        ) -> Result<RawUserPage, FetchError> {
            Ok(self.page.clone())
        }
    }

    #[tokio::test]
    async fn enriches_sorts_and_envelopes_a_page() {
        let source = FixtureSource::new(
            json!([
                { "id": 2, "firstName": "Zoe", "lastName": "Young", "role": "user" },
                { "id": 1, "firstName": "Adam", "lastName": "Bobza", "role": "admin" },
            ]),
            2,
        );

        let page = fetch_user_page(
            &source,
            &FilterState::default(),
            WINDOW,
            CancellationToken::new(),
        )
        .await
        .expect("pipeline should succeed");

        let names: Vec<&str> = page.items.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Adam Bobza", "Zoe Young"]);
        // Status is assigned before sorting, by position in the raw window.
        let by_name = |name: &str| {
            page.items
                .iter()
                .find(|u| u.name == name)
                .expect("user present")
        };
        assert_eq!(by_name("Zoe Young").status, UserStatus::Inactive);
        assert_eq!(by_name("Adam Bobza").status, UserStatus::Active);
        assert_eq!(by_name("Adam Bobza").role, Role::Admin);
        assert_eq!(by_name("Zoe Young").role, Role::Viewer);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn server_window_is_passed_through_after_role_fallback() {
        let source = FixtureSource::new(
            json!([
                { "id": 1, "firstName": "Ada", "lastName": "Lovelace", "role": "admin" },
                { "id": 2, "firstName": "Adam", "lastName": "Bobza", "role": "user" },
            ]),
            42,
        );
        let filters = FilterState {
            search_term: "ad".to_owned(),
            role: RoleFilter::Only(Role::Admin),
        };

        let page = fetch_user_page(&source, &filters, WINDOW, CancellationToken::new())
            .await
            .expect("pipeline should succeed");

        assert_eq!(page.items.len(), 1, "role fallback keeps admins only");
        assert_eq!(page.total, 42, "total reflects the server window");
        assert_eq!(page.limit, 20);
    }

    #[tokio::test]
    async fn port_errors_propagate_verbatim() {
        struct FailingSource;

        #[async_trait]
        impl UserPageSource for FailingSource {
            async fn fetch_page(
                &self,
                _endpoint: crate::domain::Endpoint,
                _window: PageWindow,
                _cancel: CancellationToken,
            ) -> Result<RawUserPage, FetchError> {
                Err(FetchError::http(500, "Internal Server Error"))
            }
        }

        let error = fetch_user_page(
            &FailingSource,
            &FilterState::default(),
            WINDOW,
            CancellationToken::new(),
        )
        .await
        .expect_err("pipeline should fail");
        assert_eq!(error, FetchError::http(500, "Internal Server Error"));
    }

    #[tokio::test]
    async fn hands_the_selected_endpoint_to_the_port() {
        use crate::domain::Endpoint;
        use crate::domain::ports::MockUserPageSource;

        let mut source = MockUserPageSource::new();
        source
            .expect_fetch_page()
            .withf(|endpoint, window, _cancel| {
                matches!(endpoint, Endpoint::Search { term } if term == "ada")
                    && window.skip == 40
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(RawUserPage {
                    users: Vec::new(),
                    total: 0,
                    skip: 40,
                    limit: 20,
                })
            });

        let filters = FilterState {
            search_term: "ada".to_owned(),
            role: RoleFilter::All,
        };
        let page = fetch_user_page(
            &source,
            &filters,
            PageWindow {
                limit: 20,
                skip: 40,
            },
            CancellationToken::new(),
        )
        .await
        .expect("pipeline should succeed");
        assert!(page.items.is_empty());
    }

    #[test]
    fn name_ordering_is_case_insensitive_and_deterministic() {
        assert_eq!(compare_names("ada", "Bob"), Ordering::Less);
        assert_eq!(compare_names("Bob", "ada"), Ordering::Greater);
        assert_ne!(compare_names("ada", "Ada"), Ordering::Equal);
    }
}
