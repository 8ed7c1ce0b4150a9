use std::sync::Arc;
use std::time::Duration;

use super::app_state::AppState;
use super::security_config::SecurityConfig;
use crate::config::server::DEFAULT_LOGIN_TIMEOUT_MS;
use crate::services::users::{InMemoryUserService, UserService};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    users: Option<Arc<dyn UserService>>,
    login_timeout: Duration,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: None,
            users: None,
            login_timeout: Duration::from_millis(DEFAULT_LOGIN_TIMEOUT_MS),
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    pub fn with_users(mut self, users: Arc<dyn UserService>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn with_login_timeout(mut self, login_timeout: Duration) -> Self {
        self.login_timeout = login_timeout;
        self
    }

    /// Without an explicit security config the codec has no secret and
    /// every login fails with a token generation error.
    pub fn build(self) -> AppState {
        let security = self
            .security_config
            .unwrap_or_else(|| SecurityConfig::new(Vec::new()));
        let users = self
            .users
            .unwrap_or_else(|| InMemoryUserService::new().into_shared());

        AppState::new(security, users, self.login_timeout)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
