//! User-service: account storage and credential checks.
//!
//! The web layer and the session issuer only see the [`UserService`] trait.
//! [`InMemoryUserService`] is the process-local implementation used by the
//! server binary and the tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::user::{NewUser, User};
use crate::logging::pii::mask_user_name;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserServiceError {
    #[error("invalid user: {0}")]
    Invalid(String),
    #[error("user name already taken: {0}")]
    Conflict(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("user service unavailable: {0}")]
    Unavailable(String),
}

/// Result of a credential check that did not match an account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignInError {
    #[error("user not found")]
    UserNotFound,
    #[error("password does not match")]
    PasswordMismatch,
    #[error("user service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, UserServiceError>;

    /// Check `password` for the account named `user_name`.
    async fn sign_in(&self, user_name: &str, password: &str) -> Result<User, SignInError>;

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, UserServiceError>;

    /// All accounts ordered by id; `query` filters on user or nick name.
    async fn list(&self, query: Option<&str>) -> Result<Vec<User>, UserServiceError>;

    /// Returns `false` when no account had that id.
    async fn delete(&self, user_id: i64) -> Result<bool, UserServiceError>;
}

struct StoredUser {
    user: User,
    password_hash: String,
}

struct Store {
    next_id: i64,
    by_id: BTreeMap<i64, StoredUser>,
}

/// Account store held in process memory, passwords kept as argon2id PHC strings.
pub struct InMemoryUserService {
    store: RwLock<Store>,
    hasher: Argon2<'static>,
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Use explicit argon2 cost parameters (tests use the minimum).
    pub fn with_params(params: Params) -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                by_id: BTreeMap::new(),
            }),
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    pub fn into_shared(self) -> Arc<dyn UserService> {
        Arc::new(self)
    }

    fn find_by_name(&self, user_name: &str) -> Option<(User, String)> {
        self.store
            .read()
            .by_id
            .values()
            .find(|stored| stored.user.user_name == user_name)
            .map(|stored| (stored.user.clone(), stored.password_hash.clone()))
    }
}

impl Default for InMemoryUserService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn create(&self, new_user: NewUser) -> Result<User, UserServiceError> {
        let user_name = new_user.user_name.trim().to_string();
        if user_name.is_empty() {
            return Err(UserServiceError::Invalid(
                "user name cannot be empty".to_string(),
            ));
        }
        if new_user.password.is_empty() {
            return Err(UserServiceError::Invalid(
                "password cannot be empty".to_string(),
            ));
        }
        if self.find_by_name(&user_name).is_some() {
            return Err(UserServiceError::Conflict(user_name));
        }

        let hasher = self.hasher.clone();
        let password = new_user.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&hasher, &password))
            .await
            .map_err(|e| UserServiceError::Hashing(e.to_string()))??;

        let mut store = self.store.write();
        // Re-check under the write lock; another registration may have won the race.
        if store
            .by_id
            .values()
            .any(|stored| stored.user.user_name == user_name)
        {
            return Err(UserServiceError::Conflict(user_name));
        }

        let user = User {
            user_id: store.next_id,
            user_name,
            nick_name: new_user.nick_name,
            email: new_user.email,
            created_at: OffsetDateTime::now_utc(),
        };
        store.next_id += 1;
        store.by_id.insert(
            user.user_id,
            StoredUser {
                user: user.clone(),
                password_hash,
            },
        );

        info!(
            user_id = user.user_id,
            user = %mask_user_name(&user.user_name),
            "User created"
        );

        Ok(user)
    }

    async fn sign_in(&self, user_name: &str, password: &str) -> Result<User, SignInError> {
        let (user, password_hash) = self
            .find_by_name(user_name)
            .ok_or(SignInError::UserNotFound)?;

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&hasher, &password, &password_hash))
                .await
                .map_err(|e| SignInError::Unavailable(e.to_string()))??;

        if !matches {
            debug!(user_id = user.user_id, "Password mismatch");
            return Err(SignInError::PasswordMismatch);
        }

        Ok(user)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, UserServiceError> {
        Ok(self
            .store
            .read()
            .by_id
            .get(&user_id)
            .map(|stored| stored.user.clone()))
    }

    async fn list(&self, query: Option<&str>) -> Result<Vec<User>, UserServiceError> {
        let needle = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let store = self.store.read();
        let users = store
            .by_id
            .values()
            .map(|stored| &stored.user)
            .filter(|user| match &needle {
                None => true,
                Some(needle) => {
                    user.user_name.to_lowercase().contains(needle.as_str())
                        || user
                            .nick_name
                            .as_deref()
                            .is_some_and(|nick| nick.to_lowercase().contains(needle.as_str()))
                }
            })
            .cloned()
            .collect();

        Ok(users)
    }

    async fn delete(&self, user_id: i64) -> Result<bool, UserServiceError> {
        let removed = self.store.write().by_id.remove(&user_id).is_some();
        if removed {
            info!(user_id, "User deleted");
        }
        Ok(removed)
    }
}

fn hash_password(hasher: &Argon2<'_>, password: &str) -> Result<String, UserServiceError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| UserServiceError::Hashing(e.to_string()))?;

    hasher
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserServiceError::Hashing(e.to_string()))
}

fn verify_password(
    hasher: &Argon2<'_>,
    password: &str,
    password_hash: &str,
) -> Result<bool, SignInError> {
    let parsed =
        PasswordHash::new(password_hash).map_err(|e| SignInError::Unavailable(e.to_string()))?;

    match hasher.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(SignInError::Unavailable(e.to_string())),
    }
}
