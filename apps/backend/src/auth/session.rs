//! Login: turn a user name and password into a signed access token.
//!
//! An attempt moves Pending → Verified → Issued, or Pending → Rejected.
//! The intermediate states are types: [`SessionIssuer::verify`] produces a
//! [`VerifiedAccount`], and only a `VerifiedAccount` can be handed to
//! [`SessionIssuer::issue`]. Nothing is kept server-side once the token is
//! returned.

use std::sync::Arc;

use time::OffsetDateTime;

use super::claims::Claims;
use super::errors::LoginError;
use super::jwt::TokenCodec;
use crate::services::users::{SignInError, UserService};

/// Account whose credentials were accepted by the user-service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccount {
    pub user_id: String,
    pub user_name: String,
}

/// A freshly minted bearer credential and the claims inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

#[derive(Clone)]
pub struct SessionIssuer {
    users: Arc<dyn UserService>,
    codec: TokenCodec,
}

impl SessionIssuer {
    pub fn new(users: Arc<dyn UserService>, codec: TokenCodec) -> Self {
        Self { users, codec }
    }

    /// Run a whole login attempt at the current wall clock.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<IssuedToken, LoginError> {
        let account = self.verify(user_name, password).await?;
        self.issue(account, OffsetDateTime::now_utc())
    }

    /// Run a whole login attempt, stamping the token with `now`.
    pub async fn login_at(
        &self,
        user_name: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<IssuedToken, LoginError> {
        let account = self.verify(user_name, password).await?;
        self.issue(account, now)
    }

    /// Pending → Verified, or Rejected.
    ///
    /// This is the only suspension point of a login. Dropping the future
    /// abandons the attempt; no token exists before it resolves.
    pub async fn verify(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<VerifiedAccount, LoginError> {
        let user = self
            .users
            .sign_in(user_name, password)
            .await
            .map_err(|e| match e {
                SignInError::UserNotFound => LoginError::UserNotFound,
                SignInError::PasswordMismatch => LoginError::PasswordMismatch,
                SignInError::Unavailable(detail) => LoginError::UserService(detail),
            })?;

        Ok(VerifiedAccount {
            user_id: user.user_id.to_string(),
            user_name: user.user_name,
        })
    }

    /// Verified → Issued.
    pub fn issue(
        &self,
        account: VerifiedAccount,
        now: OffsetDateTime,
    ) -> Result<IssuedToken, LoginError> {
        let claims = Claims::new(account.user_id, account.user_name, now)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        let token = self
            .codec
            .encode(&claims)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }
}
