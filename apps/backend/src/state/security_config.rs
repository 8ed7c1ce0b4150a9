use jsonwebtoken::Algorithm;

use crate::config::{must_var, EnvLookup};
use crate::error::AppError;

pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

/// Configuration for JWT security settings
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Read the signing secret from `JWT_SECRET`. Missing or blank is fatal.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&|name: &str| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: &EnvLookup<'_>) -> Result<Self, AppError> {
        let secret = must_var(lookup, JWT_SECRET_VAR)?;
        if secret.trim().is_empty() {
            return Err(AppError::config(format!(
                "Environment variable '{JWT_SECRET_VAR}' must not be empty"
            )));
        }
        Ok(Self::new(secret.into_bytes()))
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
