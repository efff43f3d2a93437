use crate::error::app_error::AppError;
use rocket::serde::{Deserialize, Serialize};

/// Pagination parameters for list queries.
/// Both page and limit are optional; when neither is given the whole table is returned.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: Option<i64>,
    /// Number of items per page.
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 200;

    /// Builds parameters from query values, returning `None` when pagination was not requested.
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Result<Option<Self>, AppError> {
        if page.is_none() && limit.is_none() {
            return Ok(None);
        }
        if page.is_some_and(|p| p < 1) {
            return Err(AppError::BadRequest("page must be at least 1".to_string()));
        }
        if limit.is_some_and(|l| l < 1) {
            return Err(AppError::BadRequest("limit must be at least 1".to_string()));
        }

        let params = Self { page, limit };
        if params.page.unwrap_or(1).checked_sub(1).and_then(|p| p.checked_mul(params.effective_limit())).is_none() {
            return Err(AppError::BadRequest("page is out of range".to_string()));
        }
        Ok(Some(params))
    }

    /// SQL OFFSET derived from the effective (capped) limit. `from_query` guarantees it fits in an i64.
    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1) - 1) * self.effective_limit()
    }

    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).min(Self::MAX_LIMIT)
    }
}
