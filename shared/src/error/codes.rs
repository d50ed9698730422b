//! Unified error codes for the Hemline back-office
//!
//! This module defines all error codes used across the ops server and its
//! clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission / admin-guard errors
//! - 4xxx: Order / search errors
//! - 5xxx: Background-job / worker errors
//! - 6xxx: Admin data operations
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Session revoked (token version superseded)
    SessionRevoked = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Cannot delete own account
    CannotDeleteSelf = 2003,
    /// Cannot disable, demote or delete the last active admin
    LastAdmin = 2004,
    /// Permission name not in the known catalog
    InvalidPermission = 2005,

    // ==================== 4xxx: Orders / Search ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Unknown order view
    InvalidView = 4002,
    /// Sort field not in the allow-list
    InvalidSortField = 4003,
    /// Search query below minimum length
    SearchTooShort = 4004,

    // ==================== 5xxx: Jobs / Worker ====================
    /// Job id not in the allow-list
    UnknownJob = 5001,
    /// Worker service unreachable
    WorkerUnavailable = 5002,
    /// Worker service returned an error
    WorkerError = 5003,

    // ==================== 6xxx: Admin data ====================
    /// Table name not in the inspection registry
    UnknownTable = 6001,
    /// Destructive operation confirmation phrase mismatch
    ConfirmationMismatch = 6002,
    /// Email already registered
    EmailExists = 6003,
    /// Admin user not found
    UserNotFound = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error (transient)
    NetworkError = 9004,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",

            Self::NotAuthenticated => "Please login first",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::AccountDisabled => "Account is disabled",
            Self::SessionRevoked => "Session revoked, please login again",

            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin role required",
            Self::CannotDeleteSelf => "Cannot delete your own account",
            Self::LastAdmin => "Cannot remove the last active admin",
            Self::InvalidPermission => "Unknown permission",

            Self::OrderNotFound => "Order not found",
            Self::InvalidView => "Unknown order view",
            Self::InvalidSortField => "Sort field not allowed",
            Self::SearchTooShort => "Search query too short",

            Self::UnknownJob => "Unknown job id",
            Self::WorkerUnavailable => "Worker service unavailable",
            Self::WorkerError => "Worker service error",

            Self::UnknownTable => "Unknown table",
            Self::ConfirmationMismatch => "Confirmation phrase does not match",
            Self::EmailExists => "Email already registered",
            Self::UserNotFound => "User not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::NetworkError => "Network error",
        }
    }

    /// Coarse wire label for the error body (`error.code` in responses).
    ///
    /// Callers branch on these, not on the numeric codes.
    pub fn wire_code(&self) -> &'static str {
        match self {
            Self::Success => "OK",

            Self::NotFound | Self::OrderNotFound | Self::UserNotFound => "NOT_FOUND",

            Self::AlreadyExists | Self::EmailExists => "CONFLICT",

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled
            | Self::SessionRevoked => "UNAUTHORIZED",

            Self::PermissionDenied | Self::AdminRequired => "FORBIDDEN",

            Self::WorkerUnavailable | Self::WorkerError | Self::NetworkError => "EXTERNAL_ERROR",

            Self::InternalError | Self::DatabaseError | Self::ConfigError | Self::Unknown => {
                "INTERNAL_ERROR"
            }

            // Validation, business-rule and allow-list violations
            _ => "BAD_REQUEST",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u16)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when deserializing an unknown numeric code
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::AccountDisabled,
            1006 => Self::SessionRevoked,
            2001 => Self::PermissionDenied,
            2002 => Self::AdminRequired,
            2003 => Self::CannotDeleteSelf,
            2004 => Self::LastAdmin,
            2005 => Self::InvalidPermission,
            4001 => Self::OrderNotFound,
            4002 => Self::InvalidView,
            4003 => Self::InvalidSortField,
            4004 => Self::SearchTooShort,
            5001 => Self::UnknownJob,
            5002 => Self::WorkerUnavailable,
            5003 => Self::WorkerError,
            6001 => Self::UnknownTable,
            6002 => Self::ConfirmationMismatch,
            6003 => Self::EmailExists,
            6004 => Self::UserNotFound,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::NetworkError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
