use std::sync::Arc;

use argon2::Params;
use backend::domain::user::{NewUser, User};
use backend::services::users::{InMemoryUserService, UserService};
use backend::state::builder::{build_state, StateBuilder};

use super::auth::test_security;

/// User store with a cheap argon2 cost so tests stay fast in debug builds.
pub fn fast_user_service() -> Arc<dyn UserService> {
    InMemoryUserService::with_params(Params::new(8, 1, 1, None).expect("valid argon2 params"))
        .into_shared()
}

/// State builder preloaded with the test secret and a fast user store.
pub fn test_state_builder() -> StateBuilder {
    build_state()
        .with_security(test_security())
        .with_users(fast_user_service())
}

/// Register `user_name` with `password` directly through the service.
pub async fn create_test_user(
    users: &Arc<dyn UserService>,
    user_name: &str,
    password: &str,
) -> User {
    users
        .create(NewUser {
            user_name: user_name.to_string(),
            password: password.to_string(),
            nick_name: None,
            email: None,
        })
        .await
        .expect("create test user")
}
