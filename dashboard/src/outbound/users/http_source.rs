//! Reqwest-backed users API source adapter.
//!
//! This adapter owns transport details only: URL assembly, cancellation,
//! timeout and HTTP error mapping, and JSON decoding into the raw page shape.

use std::time::Duration;

use async_trait::async_trait;
use pagination::PageWindow;
use reqwest::{Client, StatusCode, Url};
use tokio_util::sync::CancellationToken;

use crate::config::DashboardConfig;
use crate::domain::endpoint::Endpoint;
use crate::domain::enrichment::RawUserPage;
use crate::domain::error::FetchError;
use crate::domain::ports::UserPageSource;

/// Users source adapter performing HTTP GET requests against one base URL.
pub struct HttpUserPageSource {
    client: Client,
    base_url: Url,
}

impl HttpUserPageSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Build an adapter from dashboard configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.base_url.clone(), config.request_timeout)
    }

    fn request_url(&self, endpoint: &Endpoint, window: PageWindow) -> Result<Url, FetchError> {
        let path = endpoint.path_and_query(window);
        self.base_url
            .join(&path)
            .map_err(|error| FetchError::transport(format!("invalid request URL: {error}")))
    }
}

#[async_trait]
impl UserPageSource for HttpUserPageSource {
    async fn fetch_page(
        &self,
        endpoint: Endpoint,
        window: PageWindow,
        cancel: CancellationToken,
    ) -> Result<RawUserPage, FetchError> {
        let url = self.request_url(&endpoint, window)?;

        // Dropping the reqwest future aborts the in-flight request, so the
        // select frees the connection instead of merely ignoring the result.
        let send = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send();
        let response = tokio::select! {
            () = cancel.cancelled() => return Err(FetchError::Cancelled),
            outcome = send => outcome.map_err(map_transport_error)?,
        };

        let status = response.status();
        let body = tokio::select! {
            () = cancel.cancelled() => return Err(FetchError::Cancelled),
            outcome = response.bytes() => outcome.map_err(map_transport_error)?,
        };
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        parse_page(body.as_ref())
    }
}

fn parse_page(body: &[u8]) -> Result<RawUserPage, FetchError> {
    serde_json::from_slice(body)
        .map_err(|error| FetchError::decode(format!("invalid users payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    FetchError::transport(error.to_string())
}

fn map_status_error(status: StatusCode) -> FetchError {
    FetchError::http(
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown status"),
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn joins_endpoint_paths_onto_the_base_url() {
        let source = HttpUserPageSource::new(
            Url::parse("https://dummyjson.com").expect("base url"),
            Duration::from_secs(10),
        )
        .expect("client should build");

        let url = source
            .request_url(
                &Endpoint::Search {
                    term: "ada".to_owned(),
                },
                PageWindow { limit: 20, skip: 0 },
            )
            .expect("url should join");
        assert_eq!(
            url.as_str(),
            "https://dummyjson.com/users/search?q=ada&limit=20&skip=0"
        );
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, 404, "Not Found")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, 500, "Internal Server Error")]
    #[case::too_many(StatusCode::TOO_MANY_REQUESTS, 429, "Too Many Requests")]
    fn maps_statuses_to_http_errors_with_text(
        #[case] status: StatusCode,
        #[case] code: u16,
        #[case] text: &str,
    ) {
        assert_eq!(map_status_error(status), FetchError::http(code, text));
    }

    #[test]
    fn malformed_bodies_map_to_decode_errors() {
        let error = parse_page(b"{ not json").expect_err("decode should fail");
        assert!(
            matches!(error, FetchError::Decode { .. }),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn decodes_a_minimal_page() {
        let page = parse_page(br#"{ "users": [], "total": 0, "skip": 0, "limit": 20 }"#)
            .expect("page should decode");
        assert_eq!(page.total, 0);
        assert!(page.users.is_empty());
    }
}
