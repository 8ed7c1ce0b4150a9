//! Account records as seen by the web layer.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A registered account. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
    pub nick_name: Option<String>,
    pub email: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Registration payload.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    #[serde(default, alias = "userName", alias = "username")]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "nickName")]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("nick_name", &self.nick_name)
            .field("email", &self.email)
            .finish()
    }
}

/// Public view of a [`User`] returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: i64,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name.clone(),
            nick_name: user.nick_name.clone(),
            email: user.email.clone(),
            created_at: user
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
        }
    }
}
