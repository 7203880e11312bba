use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Generic success message
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
}

/// Pagination envelope returned by list endpoints
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-based)
    pub page: u64,

    /// Page size
    pub limit: u64,

    /// Total matching rows
    pub total: u64,

    /// Total page count
    pub pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

/// Response model for the health endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// RFC 3339 timestamp of the check
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_page_count_up() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.pages, 3);
    }

    #[test]
    fn pagination_with_zero_total_has_zero_pages() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.pages, 0);
    }
}
