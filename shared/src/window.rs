//! Page-window arithmetic for the article listing.

use serde::{Deserialize, Serialize};

/// Articles per listing page. The sitemap enumerates exactly one page of
/// this size, so both consumers must read it from here.
pub const PAGE_SIZE: u32 = 10;

/// Pagination state derived for one listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// 0-indexed page being shown.
    pub page_number: u64,
    /// Articles per page, always at least 1.
    pub page_size: u64,
    /// Authoritative article count from the content source.
    pub total: u64,
    /// `ceil(total / page_size)`; 0 when there are no articles.
    pub last_page: u64,
}

impl PageWindow {
    /// Resolve a 1-indexed requested page against `total` using [`PAGE_SIZE`].
    pub fn resolve(requested_page: i64, total: u64) -> Self {
        Self::resolve_with_page_size(requested_page, total, u64::from(PAGE_SIZE))
    }

    /// Resolve with an explicit page size. A zero size is treated as 1.
    pub fn resolve_with_page_size(requested_page: i64, total: u64, page_size: u64) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_number: Self::page_index(requested_page),
            page_size,
            total,
            last_page: total.div_ceil(page_size),
        }
    }

    /// 0-indexed page for a 1-indexed request; anything below 1 maps to 0.
    pub fn page_index(requested_page: i64) -> u64 {
        u64::try_from(requested_page.saturating_sub(1)).unwrap_or(0)
    }

    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page_number > 0
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page_number.saturating_add(1) < self.last_page
    }

    /// Pagination controls are only rendered for more than one page.
    pub fn is_pagination_visible(&self) -> bool {
        self.last_page > 1
    }

    /// 1-indexed `page` query value for the previous page.
    pub fn prev_page_param(&self) -> Option<u64> {
        self.has_prev().then_some(self.page_number)
    }

    /// 1-indexed `page` query value for the next page.
    pub fn next_page_param(&self) -> Option<u64> {
        self.has_next().then_some(self.page_number + 2)
    }

    /// `"{current} / {last}"` with a 1-indexed current page.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.page_number + 1, self.last_page)
    }
}

/// Read the 1-indexed `page` query parameter. Missing or non-numeric values
/// behave like page 1.
pub fn requested_page_from_query(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(1)
}
