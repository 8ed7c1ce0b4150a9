//! Request-level token check.
//!
//! Takes the raw `Authorization` header value exactly as the client sent it.
//! Both `Bearer <token>` and a bare token are accepted; the admin client
//! sends the latter.

use time::OffsetDateTime;

use super::claims::Claims;
use super::errors::AuthError;
use super::jwt::TokenCodec;

const BEARER_SCHEME: &str = "bearer";

/// Validate the credential in `header_value` against the current wall clock.
pub fn authenticate(header_value: &str, codec: &TokenCodec) -> Result<Claims, AuthError> {
    authenticate_at(header_value, codec, OffsetDateTime::now_utc())
}

/// Validate the credential in `header_value` as of `now`.
pub fn authenticate_at(
    header_value: &str,
    codec: &TokenCodec,
    now: OffsetDateTime,
) -> Result<Claims, AuthError> {
    let token = extract_token(header_value)?;
    codec.decode_at(token, now).map_err(AuthError::from)
}

/// Pull the token text out of a header value.
///
/// Empty values, and a scheme with nothing after it, count as missing.
/// Anything with more than two whitespace-separated parts cannot be a
/// token and is malformed.
pub fn extract_token(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();

    let token = match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => return Err(AuthError::MissingToken),
        (Some(scheme), None, _) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            return Err(AuthError::MissingToken)
        }
        (Some(token), None, _) => token,
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => token,
        _ => return Err(AuthError::MalformedToken),
    };

    Ok(token)
}
