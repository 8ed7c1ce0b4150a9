use actix_cors::Cors;
use actix_web::http::header;

use super::request_trace::TRACE_ID_HEADER;

/// Build CORS middleware for the admin front end.
///
/// Only the configured origins are allowed; with none configured the
/// local dev server origins are used.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let defaults = [
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ];
    let origins: &[String] = if allowed_origins.is_empty() {
        &defaults
    } else {
        allowed_origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static(TRACE_ID_HEADER)])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
