//! Offset pagination for list endpoints.
//!
//! Listings take `page`/`page_size` query parameters and return the page
//! contents together with the total row count.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// Raw pagination query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: None,
            page_size: None,
        }
    }
}

impl PageParams {
    /// Normalize to a 1-based page and a bounded page size.
    pub fn normalize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.normalize().1
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        let (page, page_size) = self.normalize();
        (page - 1) * page_size
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, total: i64, params: &PageParams) -> Self {
        let (page, page_size) = params.normalize();
        Self {
            results,
            total,
            page,
            page_size,
            total_pages: (total + page_size - 1) / page_size,
        }
    }

    /// Map page contents to another type, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
