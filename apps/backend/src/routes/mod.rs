use actix_web::web;

pub mod auth;
pub mod health;
pub mod users;

/// Register every endpoint on `cfg`.
///
/// Shared by `main.rs` and the integration tests so both serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Account routes: /api/base/**
    cfg.service(
        web::scope("/api/base")
            .configure(auth::configure_routes)
            .configure(users::configure_routes),
    );
}
