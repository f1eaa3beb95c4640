//! Offset/limit pagination for list operations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Limit used when the requested one is out of range.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Largest limit a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A resolved page request.
///
/// `offset` is passed through unvalidated; the store decides what a negative
/// offset means (libSQL treats it as zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    pub offset: i64,
    pub limit: u32,
}

impl Pagination {
    /// Build a page request, replacing a limit that is `<= 0` or above
    /// [`MAX_PAGE_LIMIT`] with [`DEFAULT_PAGE_LIMIT`].
    #[must_use]
    pub fn new(offset: i64, limit: i64) -> Self {
        let limit = match u32::try_from(limit) {
            Ok(l) if l > 0 && l <= MAX_PAGE_LIMIT => l,
            _ => DEFAULT_PAGE_LIMIT,
        };
        Self { offset, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub offset: i64,
    pub limit: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total_count: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total_count,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }
}
