use std::sync::Arc;
use std::time::Duration;

use super::security_config::SecurityConfig;
use crate::auth::jwt::TokenCodec;
use crate::auth::session::SessionIssuer;
use crate::services::users::UserService;

/// Application state shared read-only by every request
#[derive(Clone)]
pub struct AppState {
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Token codec built once from `security`
    pub codec: TokenCodec,
    /// Account storage and credential checks
    pub users: Arc<dyn UserService>,
    /// Upper bound on the credential check of a login
    pub login_timeout: Duration,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        users: Arc<dyn UserService>,
        login_timeout: Duration,
    ) -> Self {
        let codec = TokenCodec::new(&security);
        Self {
            security,
            codec,
            users,
            login_timeout,
        }
    }

    pub fn session_issuer(&self) -> SessionIssuer {
        SessionIssuer::new(Arc::clone(&self.users), self.codec.clone())
    }
}
