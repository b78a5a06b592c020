//! Full pager: page size, current page and an optional leading offset.

use serde::{Deserialize, Serialize};
use skosview_core::defaults::{PAGE_LIMIT, PAGE_OFFSET};

use crate::rows::ResultRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    /// Rows per page; 0 shows everything.
    pub items_per_page: u64,
    /// Zero-based page being displayed.
    pub current_page: u64,
    /// Rows skipped before the first page.
    pub offset: u64,
    pub total_items: u64,
    pub total_pages: u64,
    /// Rows returned by the last data call.
    pub result_count: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_LIMIT)
    }
}

impl Pager {
    pub fn new(items_per_page: u64) -> Self {
        Self {
            items_per_page,
            current_page: 0,
            offset: PAGE_OFFSET,
            total_items: 0,
            total_pages: 0,
            result_count: 0,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_current_page(mut self, page: u64) -> Self {
        self.current_page = page;
        self
    }

    /// Limit to request from the backend.
    pub fn limit(&self) -> u64 {
        self.items_per_page
    }

    /// Offset to request from the backend.
    pub fn query_offset(&self) -> u64 {
        self.current_page * self.items_per_page + self.offset
    }

    /// Record the backend total, discounting the configured leading offset.
    pub fn set_total_items(&mut self, total: u64) {
        self.total_items = total.saturating_sub(self.offset);
    }

    pub fn post_execute(&mut self, rows: &[ResultRow]) {
        self.result_count = rows.len();
    }

    /// Recompute the page count and clamp the current page into range.
    pub fn update_page_info(&mut self) {
        if self.items_per_page == 0 {
            self.total_pages = if self.total_items > 0 { 1 } else { 0 };
            return;
        }
        self.total_pages = self.total_items.div_ceil(self.items_per_page);
        if self.total_pages > 0 && self.current_page >= self.total_pages {
            self.current_page = self.total_pages - 1;
        }
    }

    pub fn has_more(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }
}
