//! Driven ports implemented by outbound adapters.
//!
//! The domain owns the request and response shapes so the pipeline stays
//! adapter-agnostic: production backs [`UserPageSource`] with the reqwest
//! adapter, tests with a mock or a deterministic fixture.

use async_trait::async_trait;
use pagination::PageWindow;
use tokio_util::sync::CancellationToken;

use super::endpoint::Endpoint;
use super::enrichment::RawUserPage;
use super::error::FetchError;

/// Port for fetching one raw page of users from the upstream API.
///
/// Implementations must observe the cancellation token cooperatively: a
/// cancelled call aborts the in-flight request and returns
/// [`FetchError::Cancelled`] instead of merely ignoring the result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPageSource: Send + Sync {
    /// Fetch the raw page for `endpoint` and `window`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] for non-2xx responses,
    /// [`FetchError::Transport`] for transport failures,
    /// [`FetchError::Decode`] for undecodable bodies, and
    /// [`FetchError::Cancelled`] when `cancel` fires first.
    async fn fetch_page(
        &self,
        endpoint: Endpoint,
        window: PageWindow,
        cancel: CancellationToken,
    ) -> Result<RawUserPage, FetchError>;
}
