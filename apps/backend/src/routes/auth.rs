use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::auth::errors::LoginError;
use crate::domain::user::{NewUser, UserProfile};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::validated_json::ValidatedJson;
use crate::http::envelope::ok;
use crate::logging::pii::mask_user_name;
use crate::state::app_state::AppState;
use crate::trace_ctx;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "userName", alias = "username")]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Create an account and return its public profile.
async fn register(
    body: ValidatedJson<NewUser>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new_user = body.into_inner();
    let hint = mask_user_name(&new_user.user_name);

    let user = app_state.users.create(new_user).await.map_err(|e| {
        warn!(user = %hint, error = %e, "Registration failed");
        AppError::from(e)
    })?;

    info!(user_id = user.user_id, "User registered");
    Ok(ok(UserProfile::from(&user)))
}

/// Check credentials and hand back a signed token.
///
/// The credential check is bounded by the configured login timeout; the
/// token is only minted once the check has resolved.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest {
        user_name,
        password,
    } = body.into_inner();
    let hint = mask_user_name(&user_name);
    let issuer = app_state.session_issuer();

    let verified =
        match tokio::time::timeout(app_state.login_timeout, issuer.verify(&user_name, &password))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    user = %hint,
                    timeout_ms = app_state.login_timeout.as_millis() as u64,
                    "Login credential check timed out"
                );
                return Err(AppError::timeout(
                    ErrorCode::LoginTimeout,
                    "Credential check did not finish in time",
                ));
            }
        };

    let issued = verified
        .and_then(|account| issuer.issue(account, OffsetDateTime::now_utc()))
        .map_err(|e| {
            log_login_failure(&hint, &e);
            AppError::from(e)
        })?;

    info!(
        user_id = issued.claims.user_id(),
        expires_at = issued.claims.expires_at(),
        "Login succeeded"
    );

    Ok(ok(LoginResponse {
        token: issued.token,
    }))
}

fn log_login_failure(hint: &str, error: &LoginError) {
    let trace_id = trace_ctx::trace_id();
    if error.is_credential_rejection() {
        warn!(
            event = "LOGIN_REJECTED",
            %trace_id,
            user = %hint,
            reason = %error,
            "Authentication failure"
        );
    } else {
        error!(
            event = "LOGIN_FAILED",
            %trace_id,
            user = %hint,
            error = %error,
            "Login could not complete"
        );
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
