//! Error codes for the backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No bearer token was presented
    UnauthorizedMissingBearer,
    /// Token could not be parsed
    UnauthorizedMalformedJwt,
    /// Token signature did not verify
    UnauthorizedInvalidSignature,
    /// Token has expired
    UnauthorizedExpiredJwt,
    /// Login name does not exist
    UserNotFound,
    /// Login password is wrong
    PasswordMismatch,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Path user id is not a number
    InvalidUserId,

    // Resource Not Found
    /// General not found error
    NotFound,

    // Conflicts
    /// User name already registered
    UserNameTaken,

    // System Errors
    /// Server cannot mint tokens
    TokenGenerationFailed,
    /// User-service failed or is unreachable
    UserServiceUnavailable,
    /// Credential check did not finish in time
    LoginTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedMalformedJwt => "UNAUTHORIZED_MALFORMED_JWT",
            Self::UnauthorizedInvalidSignature => "UNAUTHORIZED_INVALID_SIGNATURE",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidUserId => "INVALID_USER_ID",

            Self::NotFound => "NOT_FOUND",

            Self::UserNameTaken => "USER_NAME_TAKEN",

            Self::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            Self::UserServiceUnavailable => "USER_SERVICE_UNAVAILABLE",
            Self::LoginTimeout => "LOGIN_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
