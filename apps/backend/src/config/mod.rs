//! Process configuration read from the environment at startup.
//!
//! Parsing goes through an [`EnvLookup`] so tests can feed values without
//! touching the real process environment.

pub mod server;

use crate::error::AppError;

/// Source of configuration values by variable name.
pub type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Get required variable or return error
pub(crate) fn must_var(lookup: &EnvLookup<'_>, name: &str) -> Result<String, AppError> {
    lookup(name)
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Get optional variable, treating blank values as unset
pub(crate) fn opt_var(lookup: &EnvLookup<'_>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}
