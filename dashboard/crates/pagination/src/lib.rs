//! Page window derivation and pagination envelope primitives.
//!
//! [`Pager`] owns the current-page state for a paginated query and derives the
//! `{limit, skip}` window on every read, so the window can never drift from
//! the page number. [`Page`] is the generic result envelope carrying one page
//! of items together with the server-reported pagination window.

use serde::{Deserialize, Serialize};

/// Errors raised when constructing a [`Pager`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagerError {
    /// The page size must be strictly positive.
    #[error("items per page must be greater than zero")]
    ZeroPageSize,
}

/// The `{limit, skip}` slice of the upstream collection requested for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Maximum number of items requested.
    pub limit: u32,
    /// Number of items skipped before this page starts.
    pub skip: u32,
}

/// Current-page state for a paginated query.
///
/// ## Invariants
/// - `current_page` never falls below 1.
/// - `items_per_page` is strictly positive.
///
/// # Examples
/// ```
/// use pagination::Pager;
///
/// let mut pager = Pager::new(10).expect("non-zero page size");
/// pager.go_to_page(3);
/// let window = pager.window();
/// assert_eq!(window.limit, 10);
/// assert_eq!(window.skip, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: u32,
    items_per_page: u32,
}

impl Pager {
    /// Create a pager positioned on page 1.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::ZeroPageSize`] when `items_per_page` is zero.
    pub const fn new(items_per_page: u32) -> Result<Self, PagerError> {
        if items_per_page == 0 {
            return Err(PagerError::ZeroPageSize);
        }
        Ok(Self {
            current_page: 1,
            items_per_page,
        })
    }

    /// Current 1-based page number.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Configured page size.
    #[must_use]
    pub const fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Move to `page`, clamping to 1. No upper bound is enforced here; the
    /// caller clamps against the known total if it wants to.
    pub const fn go_to_page(&mut self, page: u32) {
        self.current_page = if page == 0 { 1 } else { page };
    }

    /// Return to page 1.
    pub const fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Derive the `{limit, skip}` window for the current page.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        PageWindow {
            limit: self.items_per_page,
            skip: (self.current_page - 1).saturating_mul(self.items_per_page),
        }
    }
}

/// One page of results together with the server-reported window.
///
/// `total`, `skip`, and `limit` describe the *server's* pagination window;
/// `items.len()` may be smaller after client-side post-filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in display order.
    pub items: Vec<T>,
    /// Total matching items reported by the server.
    pub total: u64,
    /// Items skipped before this page, as reported by the server.
    pub skip: u32,
    /// Window size requested from the server.
    pub limit: u32,
}

impl<T> Page<T> {
    /// 1-based index of the first item in the server window.
    #[must_use]
    pub const fn display_start(&self) -> u64 {
        if self.skip == 0 { 1 } else { self.skip as u64 + 1 }
    }

    /// 1-based index of the last item in the server window, clamped to the
    /// reported total.
    #[must_use]
    pub const fn display_end(&self) -> u64 {
        let end = self.skip as u64 + self.limit as u64;
        if end < self.total { end } else { self.total }
    }
}
