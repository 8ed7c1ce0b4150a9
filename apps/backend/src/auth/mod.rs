//! Token-based authentication core.
//!
//! - [`claims`]: identity payload and its 12 hour validity window
//! - [`jwt`]: signing and verification with the process-wide secret
//! - [`gate`]: header value → validated claims
//! - [`session`]: credentials → signed token
//!
//! Nothing in here logs or builds HTTP responses; callers get typed errors.

pub mod claims;
pub mod errors;
pub mod gate;
pub mod jwt;
pub mod session;

pub use claims::{Claims, TOKEN_TTL_SECS};
pub use errors::{AuthError, ClaimsError, DecodeError, LoginError, SigningError};
pub use gate::{authenticate, authenticate_at};
pub use jwt::TokenCodec;
pub use session::{IssuedToken, SessionIssuer, VerifiedAccount};
