//! Paging state, list request parameters and the response shapes returned by
//! the inventory backend.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Clamp a requested page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    let upper = i64::from(total_pages.max(1));
    // upper fits in u32, so the clamped value does too
    requested.clamp(1, upper) as u32
}

/// Normalize a search term: blank or absent means "no filter".
pub fn normalize_search_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

/// Paging and search state of one collection view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListState {
    pub page: u32,
    pub page_size: u32,
    pub search_term: Option<String>,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Default for ListState {
    fn default() -> Self {
        Self::with_page_size(defaults::PAGE_SIZE)
    }
}

impl ListState {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page: defaults::FIRST_PAGE,
            page_size: page_size.max(1),
            search_term: None,
            total_items: 0,
            total_pages: 0,
        }
    }

    /// Parameters for the next list request.
    pub fn params(&self) -> ListParams {
        ListParams {
            page: self.page,
            page_size: self.page_size,
            search_term: self.search_term.clone(),
        }
    }

    /// Upper page bound, treating unknown totals as a single page.
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// Merge a server page into this state. Fields the server omitted keep
    /// their current values; the page is re-clamped afterwards.
    pub fn apply_response<T>(&mut self, response: &PagedResponse<T>) {
        if let Some(total_items) = response.total_items {
            self.total_items = total_items;
        }
        if let Some(total_pages) = response.total_pages {
            self.total_pages = total_pages;
        }
        if let Some(page_size) = response.page_size.filter(|s| *s > 0) {
            self.page_size = page_size;
        }
        if let Some(page) = response.page {
            self.page = page;
        }
        self.page = clamp_page(i64::from(self.page), self.total_pages);
    }
}

/// Query parameters of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

/// One page of a collection as reported by the server. Every field may be
/// missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub items: Option<Vec<T>>,
    pub total_items: Option<u64>,
    pub total_pages: Option<u32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl<T> Default for PagedResponse<T> {
    fn default() -> Self {
        Self {
            items: None,
            total_items: None,
            total_pages: None,
            page: None,
            page_size: None,
        }
    }
}

impl<T> PagedResponse<T> {
    /// A fully populated page.
    pub fn new(items: Vec<T>, total_items: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(page_size)) as u32
        };
        Self {
            items: Some(items),
            total_items: Some(total_items),
            total_pages: Some(total_pages),
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

/// A server response: status, payload and optional server message.
///
/// Failed responses carry `T::default()` as payload; callers must check
/// `status` before reading `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A 200 response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::with_status(200, data)
    }

    pub fn with_status(status: u16, data: T) -> Self {
        Self {
            status,
            data,
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

impl<T: Default> ApiResponse<T> {
    /// A failed response with an optional server message.
    pub fn failure(status: u16, message: Option<String>) -> Self {
        Self {
            status,
            data: T::default(),
            message,
        }
    }
}
