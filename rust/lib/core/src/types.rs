use serde::{Deserialize, Serialize};

/// Page size used when a collection request gives no `limit`.
pub const DEFAULT_LIMIT: usize = 50;

/// Pagination window for collection endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    /// Maximum number of results to return.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Offset for pagination.
    #[serde(default)]
    pub offset: usize,
}

pub fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Result wrapper for collection operations.
///
/// `total` is the number of matching items before the window was applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResult<T> {
    /// Cut the `[offset, offset + limit)` window out of an already
    /// filtered and ordered collection.
    pub fn paginate(items: Vec<T>, params: &ListParams) -> Self {
        let total = items.len();
        let items = items
            .into_iter()
            .skip(params.offset)
            .take(params.limit)
            .collect();
        Self { items, total }
    }
}

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
    }

    #[test]
    fn paginate_keeps_total() {
        let page = ListResult::paginate((1..=7).collect::<Vec<u32>>(), &ListParams { limit: 3, offset: 2 });
        assert_eq!(page.items, vec![3, 4, 5]);
        assert_eq!(page.total, 7);
    }

    #[test]
    fn paginate_past_end_is_empty() {
        let page = ListResult::paginate(vec!["a", "b"], &ListParams { limit: 10, offset: 5 });
        assert!(page.items.is_empty());
        assert_eq!(page.total, 2);
    }

    #[test]
    fn list_params_defaults() {
        let p: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p, ListParams::default());
        assert_eq!(p.limit, 50);
    }
}
