//! HS256 access-token codec.
//!
//! Tokens are standard three-segment JWTs whose payload is [`Claims`].
//! Expiry lives in the custom `expires_at` field, so the library's own
//! `exp` handling is switched off and expiry is checked here, strictly
//! after the signature has verified.

use std::collections::HashSet;
use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::OffsetDateTime;

use super::claims::Claims;
use super::errors::{DecodeError, SigningError};
use crate::state::security_config::SecurityConfig;

/// Encodes and verifies access tokens with the process-wide secret.
///
/// Built once at startup from [`SecurityConfig`] and shared read-only
/// between requests.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    has_secret: bool,
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        let mut validation = Validation::new(security.algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            algorithm: security.algorithm,
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
            validation,
            has_secret: security.is_configured(),
        }
    }

    /// Sign `claims` into a compact token.
    pub fn encode(&self, claims: &Claims) -> Result<String, SigningError> {
        if !self.has_secret {
            return Err(SigningError::MissingSecret);
        }

        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| SigningError::Encode(e.to_string()))
    }

    /// Verify `token` against the current wall clock.
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        self.decode_at(token, OffsetDateTime::now_utc())
    }

    /// Verify `token` as of `now`.
    ///
    /// Errors:
    /// - not a structurally valid token → `DecodeError::Malformed`
    /// - signature or algorithm does not verify → `DecodeError::InvalidSignature`
    /// - `now >= expires_at` on a well-signed token → `DecodeError::Expired`
    pub fn decode_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims, DecodeError> {
        check_structure(token)?;

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                // Header and payload already parsed, so a base64 failure is in the signature.
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::Base64(_) => {
                    DecodeError::InvalidSignature
                }
                _ => DecodeError::Malformed,
            })?;

        if claims.is_expired_at(now) {
            return Err(DecodeError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("has_secret", &self.has_secret)
            .finish_non_exhaustive()
    }
}

/// Reject anything that is not `header.payload.signature` with a JSON
/// header and a payload shaped like [`Claims`], before any crypto runs.
///
/// Everything after the second dot is the signature; if it is not a single
/// base64url run it cannot verify, whatever it contains.
fn check_structure(token: &str) -> Result<(), DecodeError> {
    let mut segments = token.splitn(3, '.');
    let (Some(header), Some(payload), Some(signature)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(DecodeError::Malformed);
    };

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| DecodeError::Malformed)?;
    serde_json::from_slice::<Header>(&header).map_err(|_| DecodeError::Malformed)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| DecodeError::Malformed)?;
    serde_json::from_slice::<Claims>(&payload).map_err(|_| DecodeError::Malformed)?;

    if signature.is_empty() || !signature.bytes().all(is_base64url) {
        return Err(DecodeError::InvalidSignature);
    }

    Ok(())
}

fn is_base64url(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}
