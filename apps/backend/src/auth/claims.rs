//! Identity payload carried inside every access token.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::errors::ClaimsError;

/// Lifetime of an access token in seconds (12 hours).
pub const TOKEN_TTL_SECS: i64 = 12 * 60 * 60;

/// Claims embedded in backend-issued access tokens.
///
/// Fields are private so a value cannot change after construction; the
/// only ways to obtain one are [`Claims::new`] and decoding a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    user_id: String,
    user_name: String,
    /// Issued-at (seconds since epoch)
    issued_at: i64,
    /// Expiry (seconds since epoch)
    expires_at: i64,
}

impl Claims {
    /// Build claims for a freshly verified account, valid for [`TOKEN_TTL_SECS`].
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        now: OffsetDateTime,
    ) -> Result<Self, ClaimsError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(ClaimsError::EmptyUserId);
        }

        let issued_at = now.unix_timestamp();
        Ok(Self {
            user_id,
            user_name: user_name.into(),
            issued_at,
            expires_at: issued_at + TOKEN_TTL_SECS,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// A token is expired from the second its expiry is reached.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now.unix_timestamp() >= self.expires_at
    }
}
