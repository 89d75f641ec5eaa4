use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Read access to a pagination request, so callers can keep their own
/// request types.
pub trait Pagination {
    fn page(&self) -> i64;
    fn size(&self) -> i64;
    fn sort(&self) -> &str;
    fn search(&self) -> &str;
    fn filter(&self) -> &BTreeMap<String, String>;
}

/// Page, size, sort, search and filter as received from a client.
///
/// - `sort`: comma separated, `-` prefix for descending, e.g. `-id,created_at`
/// - `filter`: `field` or `field:op` keys, ops are `eq`, `ne`, `like`,
///   `contain`, `gt`, `gte`, `lt`, `lte`, `in`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationRequest {
    pub page: i64,
    pub size: i64,
    pub sort: String,
    pub search: String,
    pub filter: BTreeMap<String, String>,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            sort: String::new(),
            search: String::new(),
            filter: BTreeMap::new(),
        }
    }
}

impl PaginationRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            ..Default::default()
        }
    }

    pub fn sort(mut self, sort: &str) -> Self {
        self.sort = sort.to_string();
        self
    }

    pub fn search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn filter(mut self, key: &str, value: &str) -> Self {
        self.filter.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets the sort spec only when the client did not send one.
    pub fn with_default_sort(mut self, sort: &str) -> Self {
        if self.sort.is_empty() {
            self.sort = sort.to_string();
        }
        self
    }
}

impl Pagination for PaginationRequest {
    fn page(&self) -> i64 {
        self.page
    }

    fn size(&self) -> i64 {
        self.size
    }

    fn sort(&self) -> &str {
        &self.sort
    }

    fn search(&self) -> &str {
        &self.search
    }

    fn filter(&self) -> &BTreeMap<String, String> {
        &self.filter
    }
}

/// A validated page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page: u64,
    pub size: u64,
}

impl PageWindow {
    /// Normalizes raw page/size: values below 1 fall back to page 1 and
    /// `default_size`; sizes above `max_size` are clamped.
    pub fn normalize(page: i64, size: i64, default_size: u64, max_size: Option<u64>) -> Self {
        let page = if page < 1 { 1 } else { page as u64 };
        let mut size = if size < 1 {
            default_size.max(1)
        } else {
            size as u64
        };
        if let Some(max) = max_size {
            size = size.min(max.max(1));
        }
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }

    pub fn limit(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_applies_defaults() {
        let request: PaginationRequest = serde_json::from_str(r#"{"sort":"-id"}"#).unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.size, 10);
        assert_eq!(request.sort, "-id");
        assert!(request.filter.is_empty());
    }

    #[test]
    fn test_deserialize_filter_map() {
        let request: PaginationRequest = serde_json::from_str(
            r#"{"page":2,"size":5,"filter":{"title:like":"foo","age:in":"1,2"}}"#,
        )
        .unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.filter.get("title:like").map(String::as_str), Some("foo"));
        assert_eq!(request.filter.len(), 2);
    }

    #[test]
    fn test_with_default_sort_keeps_client_sort() {
        let request = PaginationRequest::default().with_default_sort("-id");
        assert_eq!(request.sort, "-id");

        let request = PaginationRequest::default()
            .sort("title")
            .with_default_sort("-id");
        assert_eq!(request.sort, "title");
    }

    #[test]
    fn test_window_normalizes_out_of_range_input() {
        let window = PageWindow::normalize(0, -3, 10, None);
        assert_eq!(window, PageWindow { page: 1, size: 10 });
        assert_eq!(window.offset(), 0);

        let window = PageWindow::normalize(3, 10, 10, None);
        assert_eq!(window.offset(), 20);
        assert_eq!(window.limit(), 10);
    }

    #[test]
    fn test_window_clamps_to_max_size() {
        let window = PageWindow::normalize(2, 500, 10, Some(100));
        assert_eq!(window.size, 100);
        assert_eq!(window.offset(), 100);
    }
}
