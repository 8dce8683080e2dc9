//! Upstream users API adapters.
//!
//! This module provides the reqwest-backed implementation of the
//! `UserPageSource` port.

mod http_source;

pub use http_source::HttpUserPageSource;
