//! Utility Functions
//!
//! Common helpers shared across the server: result aliases, response
//! helpers, logging setup, business-timezone conversion, input validation.

pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use result::AppResult;
pub use shared::{ApiResponse, AppError, ErrorCode};

use axum::Json;
use serde::Serialize;

/// Create a successful response envelope
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}
