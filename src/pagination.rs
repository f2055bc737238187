//! Pagination utilities for Perma API list endpoints.

use serde::{Deserialize, Serialize};

/// Default number of items requested per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// A page of results, as served by the Perma API.
///
/// List endpoints return `{ meta: {...}, objects: [...] }`; both parts are
/// passed through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Pagination metadata for this page.
    pub meta: PaginationMeta,
    /// The items on this page.
    pub objects: Vec<T>,
}

/// Pagination metadata served alongside paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Page size the server applied.
    pub limit: u32,
    /// Offset of the first item on this page.
    pub offset: u32,
    /// Total number of items across all pages.
    pub total_count: u64,
    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Page<T> {
    /// Whether the server reports more pages after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.meta.next.is_some()
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.objects.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

/// Query parameters for paginated requests.
///
/// `offset >= 0` is guaranteed by the type; `limit >= 1` is checked by
/// [`crate::validate::pagination`] before dispatch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    /// Number of items per page.
    pub limit: u32,
    /// Number of items to skip.
    pub offset: u32,
}

impl Pagination {
    /// Create a pagination window.
    #[must_use]
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_envelope() {
        let json = r#"{
            "meta": {"limit": 10, "offset": 0, "total_count": 25, "next": "/v1/folders?limit=10&offset=10", "previous": null},
            "objects": [1, 2, 3]
        }"#;
        let page: Page<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.objects, vec![1, 2, 3]);
        assert_eq!(page.meta.total_count, 25);
        assert!(page.has_more());
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_page_last_page_has_no_more() {
        let json = r#"{
            "meta": {"limit": 10, "offset": 20, "total_count": 25, "next": null, "previous": "/v1/folders?limit=10&offset=10"},
            "objects": [1]
        }"#;
        let page: Page<i32> = serde_json::from_str(json).unwrap();
        assert!(!page.has_more());
    }

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn test_pagination_serializes_to_query_fields() {
        let value = serde_json::to_value(Pagination::new(10, 5)).unwrap();
        assert_eq!(value, serde_json::json!({"limit": 10, "offset": 5}));
    }
}
