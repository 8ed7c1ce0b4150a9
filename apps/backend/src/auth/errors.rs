//! Typed failures of the authentication core.
//!
//! The core returns these to its caller and never logs or maps them itself;
//! `crate::error` turns them into HTTP responses.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error("user id must not be empty")]
    EmptyUserId,
}

/// Token minting failed. Always a server configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("failed to encode token: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

/// Outcome of validating the credential presented with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

impl From<DecodeError> for AuthError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::Malformed => AuthError::MalformedToken,
            DecodeError::InvalidSignature => AuthError::InvalidSignature,
            DecodeError::Expired => AuthError::Expired,
        }
    }
}

/// Why a login attempt did not produce a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("user not found")]
    UserNotFound,
    #[error("password does not match")]
    PasswordMismatch,
    #[error("failed to generate token: {0}")]
    TokenGenerationFailed(String),
    #[error("user service unavailable: {0}")]
    UserService(String),
}

impl LoginError {
    /// Rejections caused by the presented credentials, as opposed to server faults.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, LoginError::UserNotFound | LoginError::PasswordMismatch)
    }
}
