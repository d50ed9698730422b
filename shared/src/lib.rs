//! Shared types for the Hemline back-office
//!
//! Common types used by the ops server and its clients: error codes and the
//! structured error type, the API response envelope, domain models, and
//! small utilities.

pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::{ApiResponse, Paginated, Pagination};
