use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::user::UserProfile;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::user_id::UserIdPath;
use crate::http::envelope::ok;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedUser {
    pub user_id: i64,
}

/// Profile of the account the bearer token was issued to.
async fn info(
    current: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current.user_id().parse::<i64>().map_err(|_| {
        AppError::unauthorized(
            ErrorCode::UnauthorizedMalformedJwt,
            "Token subject is not an account id",
        )
    })?;

    let user = app_state.users.find_by_id(user_id).await?.ok_or_else(|| {
        AppError::not_found(
            ErrorCode::UserNotFound,
            format!("User {user_id} no longer exists"),
        )
    })?;

    Ok(ok(UserProfile::from(&user)))
}

async fn list(
    _current: CurrentUser,
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let users = app_state.users.list(filter).await?;
    let profiles: Vec<UserProfile> = users.iter().map(UserProfile::from).collect();

    Ok(ok(profiles))
}

async fn delete(
    current: CurrentUser,
    UserIdPath(user_id): UserIdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if !app_state.users.delete(user_id).await? {
        return Err(AppError::not_found(
            ErrorCode::NotFound,
            format!("User {user_id} not found"),
        ));
    }

    info!(deleted_user_id = user_id, by = current.user_id(), "User deleted");
    Ok(ok(DeletedUser { user_id }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/info", web::get().to(info))
        .route("/users", web::get().to(list))
        .route("/delete/{id}", web::delete().to(delete));
}
