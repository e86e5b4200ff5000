//! # Pagination
//!
//! Offset pagination for listing commands.
//!
//! ## Window Math
//! ```text
//! total = 25, limit = 10
//!
//!   page 1 → skip  0, take 10 → ids  1..10
//!   page 2 → skip 10, take 10 → ids 11..20
//!   page 3 → skip 20, take 10 → ids 21..25   (5 records)
//!   page 4 → skip 30, take 10 → []           (not an error)
//!
//!   lastPage = ceil(25 / 10) = 3
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};

/// A validated page request. Both values are `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationQuery {
    page: u64,
    limit: u64,
}

impl PaginationQuery {
    /// Builds a query, rejecting zero for either value.
    pub fn new(page: u64, limit: u64) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::MustBePositive {
                field: "page".to_string(),
            });
        }
        if limit == 0 {
            return Err(ValidationError::MustBePositive {
                field: "limit".to_string(),
            });
        }
        Ok(PaginationQuery { page, limit })
    }

    #[inline]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[inline]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of records to skip: `(page - 1) * limit`, saturating.
    #[inline]
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        PaginationQuery {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Metadata returned next to every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// The page that was requested (echoed even when past the end).
    #[ts(type = "number")]
    pub page: u64,

    /// Count of records matching the listing filter.
    #[ts(type = "number")]
    pub total: u64,

    /// `ceil(total / limit)`; zero when there are no records.
    #[ts(type = "number")]
    pub last_page: u64,
}

impl PageMeta {
    /// Computes page metadata for a query and a total count.
    pub fn new(query: &PaginationQuery, total: u64) -> Self {
        PageMeta {
            page: query.page(),
            total,
            last_page: total.div_ceil(query.limit()),
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

// =============================================================================
// Unit Tests
// =============================================================================
