use actix_web::{web, App, HttpServer};
use backend::config::server::ServerConfig;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::services::users::InMemoryUserService;
use backend::state::builder::build_state;
use backend::state::security_config::SecurityConfig;
use backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid server configuration: {e}");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = build_state()
        .with_security(security_config)
        .with_users(InMemoryUserService::new().into_shared())
        .with_login_timeout(server_config.login_timeout)
        .build();

    tracing::info!(
        host = %server_config.host,
        port = server_config.port,
        login_timeout_ms = server_config.login_timeout.as_millis() as u64,
        "Starting zone backend"
    );

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);
    let allowed_origins = server_config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&allowed_origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
