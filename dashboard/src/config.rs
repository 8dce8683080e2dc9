//! Runtime configuration for the dashboard core.
//!
//! Plain data the embedder fills in; resolving values from the environment
//! or config files is the embedder's concern, not this crate's.

use std::time::Duration;

use url::Url;

use crate::domain::DEFAULT_DEBOUNCE;

const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
const DEFAULT_ITEMS_PER_PAGE: u32 = 20;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for one dashboard session and its upstream client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of the upstream users API.
    pub base_url: Url,
    /// Page size used for every window.
    pub items_per_page: u32,
    /// Idle window for search input debouncing.
    pub debounce: Duration,
    /// Transport-level request timeout.
    pub request_timeout: Duration,
}

impl DashboardConfig {
    /// Configuration with defaults, pointed at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid");
        Self::new(base_url)
    }
}
