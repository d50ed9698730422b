//! Unified error system
//!
//! - [`ErrorCode`]: standardized numeric codes grouped by domain range
//! - [`AppError`]: rich error type with code, message, and details
//! - [`ErrorBody`]: the `error` object embedded in failed API responses
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid email format");
//! assert_eq!(err.body().code, "BAD_REQUEST");
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
