use std::time::Duration;

use super::{opt_var, EnvLookup};
use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_LOGIN_TIMEOUT_MS: u64 = 5_000;

/// HTTP listener and request-handling settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub login_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Reads `BACKEND_HOST`, `BACKEND_PORT`, `LOGIN_TIMEOUT_MS` and
    /// `CORS_ALLOWED_ORIGINS`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&|name: &str| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: &EnvLookup<'_>) -> Result<Self, AppError> {
        let host = opt_var(lookup, "BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match opt_var(lookup, "BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let login_timeout_ms = match opt_var(lookup, "LOGIN_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(AppError::config(format!(
                        "LOGIN_TIMEOUT_MS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_LOGIN_TIMEOUT_MS,
        };

        Ok(Self {
            host,
            port,
            login_timeout: Duration::from_millis(login_timeout_ms),
            cors_allowed_origins: parse_origins(
                &opt_var(lookup, "CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            ),
        })
    }
}

/// Comma-separated origins; empty, `null` and non-http(s) entries are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect()
}
