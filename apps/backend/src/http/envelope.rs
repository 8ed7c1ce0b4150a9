use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

/// Success envelope shared by every JSON endpoint.
///
/// Failures never use this shape; they are rendered as Problem Details by
/// [`crate::error::AppError`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "success".to_string(),
            data,
        }
    }
}

/// `200 OK` with `data` wrapped in [`ApiResponse`].
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(data))
}
