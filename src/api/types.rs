// src/api/types.rs
//! Type definitions shared by the API module.

/// Accumulated result of following a pagination cursor to its end.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    /// True when the page limit stopped the walk before `has_more` went false.
    pub truncated: bool,
}
