//! API Response types
//!
//! Standardized response envelope for the entire back-office:
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "..." } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorBody, ErrorCode};

/// Unified API response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Structured error (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(err: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.body()),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size as u64) as u32
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// List of items
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(page, page_size, total),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();

        // Unexpected failures are logged in full, then masked on the wire.
        let masked = match self.code {
            ErrorCode::DatabaseError => {
                tracing::error!(target: "database", error = %self.message, "Database error occurred");
                AppError::new(ErrorCode::DatabaseError)
            }
            ErrorCode::InternalError => {
                tracing::error!(target: "internal", error = %self.message, "Internal error occurred");
                AppError::new(ErrorCode::InternalError)
            }
            _ => self,
        };

        let body = axum::Json(ApiResponse::<()>::error(&masked));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_up() {
        let p = Pagination::new(1, 50, 101);
        assert_eq!(p.total_pages, 3);
        let p = Pagination::new(1, 50, 100);
        assert_eq!(p.total_pages, 2);
        let p = Pagination::new(1, 50, 0);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn error_envelope_shape() {
        let err = AppError::new(ErrorCode::AdminRequired);
        let resp = ApiResponse::<()>::error(&err);
        assert!(!resp.success);
        assert_eq!(resp.error.unwrap().code, "FORBIDDEN");
        let ok = ApiResponse::ok(42);
        assert!(ok.success);
        assert!(ok.error.is_none());
    }
}
