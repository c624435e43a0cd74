//! Claim listing rules
//!
//! Listing filters the collection by status and reports pagination metadata.
//! The claims themselves are returned unsliced: page and limit only shape
//! the metadata.

use serde::Serialize;

use crate::claim::{Claim, ClaimStatus};

/// Page used when the query omits or garbles `page`
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the query omits or garbles `limit`
pub const DEFAULT_LIMIT: u32 = 10;

/// Status filter for listings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering
    #[default]
    All,
    /// Exact status match
    Only(ClaimStatus),
    /// A status value no claim can have
    Unrecognized(String),
}

impl StatusFilter {
    /// Interprets the raw `status` query value
    ///
    /// Missing, empty and `all` select everything.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some("all") => StatusFilter::All,
            Some(value) => value
                .parse::<ClaimStatus>()
                .map(StatusFilter::Only)
                .unwrap_or_else(|_| StatusFilter::Unrecognized(value.to_string())),
        }
    }

    /// Returns true if a claim with the given status passes the filter
    pub fn matches(&self, status: ClaimStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
            StatusFilter::Unrecognized(_) => false,
        }
    }
}

/// A listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub status: StatusFilter,
    /// 1-based page number
    pub page: u32,
    /// Page size, never zero
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    /// Builds a query from raw query-string values
    pub fn from_raw(status: Option<&str>, page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            status: StatusFilter::parse(status),
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Filters a collection, preserving its order
    pub fn apply(&self, claims: Vec<Claim>) -> ClaimListing {
        let claims: Vec<Claim> = claims
            .into_iter()
            .filter(|c| self.status.matches(c.status))
            .collect();
        let pagination = Pagination::compute(self.page, self.limit, claims.len());

        ClaimListing { claims, pagination }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok()).filter(|v| *v > 0)
}

/// Pagination summary reported alongside a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_claims: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Computes the summary for `total` matching claims
    pub fn compute(page: u32, limit: u32, total: usize) -> Self {
        let limit = limit.max(1) as usize;
        let total_pages = total.div_ceil(limit) as u32;

        Self {
            current_page: page,
            total_pages,
            total_claims: total,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Result of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimListing {
    pub claims: Vec<Claim>,
    pub pagination: Pagination,
}
