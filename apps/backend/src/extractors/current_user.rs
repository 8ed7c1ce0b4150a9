use actix_web::dev::Payload;
use actix_web::{http::header, web, FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::Claims;
use crate::auth::gate::authenticate;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Caller identity proven by a valid bearer token.
///
/// The raw `Authorization` header is handed to the auth gate unchanged;
/// an absent header is treated like an empty one.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub claims: Claims,
}

impl CurrentUser {
    pub fn user_id(&self) -> &str {
        self.claims.user_id()
    }

    pub fn user_name(&self) -> &str {
        self.claims.user_name()
    }
}

/// Authenticated user id, left in request extensions for request logging.
#[derive(Debug, Clone)]
pub struct AuthenticatedUserId(pub String);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal(ErrorCode::Internal, "AppState not available"))?;

    let header_value = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| {
            AppError::unauthorized(
                ErrorCode::UnauthorizedMalformedJwt,
                "Authorization header is not valid text",
            )
        })?,
        None => "",
    };

    let claims = authenticate(header_value, &app_state.codec)?;

    req.extensions_mut()
        .insert(AuthenticatedUserId(claims.user_id().to_string()));

    Ok(CurrentUser { claims })
}
