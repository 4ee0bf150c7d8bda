//! Page slicing shared by navigator results, the public directory, and admin lists.

use serde::{Deserialize, Serialize};

use crate::config::{NavigatorConfig, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};

/// Caller-supplied paging parameters. Pages are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

impl PageRequest {
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Clamps the request into `1..` pages and `1..=max_limit` items; a zero
    /// limit falls back to `default_limit`.
    pub fn normalized(self, default_limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.max(1);
        let limit = match self.limit {
            0 => default_limit.clamp(1, max_limit),
            limit => limit.min(max_limit),
        };
        Self {
            page: self.page.max(1),
            limit,
        }
    }

    fn offset(self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }
}

/// `?page=&limit=` query string; missing values fall back to page 1 and the
/// policy's default limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(0))
    }
}

/// Deployment-wide default and cap applied to every paged request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl PagingPolicy {
    pub fn apply(&self, request: PageRequest) -> PageRequest {
        request.normalized(self.default_limit, self.max_limit)
    }

    pub fn paginate<T>(&self, items: Vec<T>, request: PageRequest) -> Page<T> {
        Page::from_ordered(items, self.apply(request))
    }
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
            max_limit: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl From<&NavigatorConfig> for PagingPolicy {
    fn from(config: &NavigatorConfig) -> Self {
        Self {
            default_limit: config.page_size,
            max_limit: config.max_page_size,
        }
    }
}

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Slices `items` (already in display order) for an already normalized request.
    pub fn from_ordered(items: Vec<T>, request: PageRequest) -> Self {
        let total_count = items.len();
        let offset = request.offset();
        let page_items: Vec<T> = items
            .into_iter()
            .skip(offset)
            .take(request.limit as usize)
            .collect();
        let shown_through = (request.page as usize).saturating_mul(request.limit as usize);

        Self {
            items: page_items,
            total_count,
            page: request.page,
            limit: request.limit,
            has_more: total_count > shown_through,
        }
    }
}
