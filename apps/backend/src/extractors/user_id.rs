use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Numeric account id taken from the `{id}` route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdPath(pub i64);

impl FromRequest for UserIdPath {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(parse(req.match_info().get("id")))
    }
}

fn parse(raw: Option<&str>) -> Result<UserIdPath, AppError> {
    let raw =
        raw.ok_or_else(|| AppError::bad_request(ErrorCode::InvalidUserId, "Missing id parameter"))?;

    let id = raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidUserId, format!("Invalid user id: {raw}"))
    })?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidUserId,
            format!("User id must be positive, got: {id}"),
        ));
    }

    Ok(UserIdPath(id))
}
