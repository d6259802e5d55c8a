//! # Pagination
//!
//! List endpoints return a page of items plus a continuation signal:
//!
//! ```text
//! { "data": [ ... ], "hasMore": true, "nextCursor": "c_42", "total": 120 }
//! ```
//!
//! Pages are 1-indexed. `hasMore == false` is the only termination signal;
//! an empty `data` array with `hasMore == true` still has a next page.

use serde::{Deserialize, Serialize};

/// Default page size sent when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One page of a paginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> PaginatedResponse<T> {
    /// Final page with the given items.
    pub fn last(data: Vec<T>) -> Self {
        Self {
            data,
            has_more: false,
            next_cursor: None,
            total: None,
        }
    }
}

/// Page/cursor parameters accepted by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl PaginationParams {
    /// Parameters for a 1-indexed page.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page.max(1)),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Query-string pairs in a stable order (`page`, `limit`, `cursor`).
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push(("cursor".to_string(), cursor.clone()));
        }
        query
    }
}
