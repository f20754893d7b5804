//! # Blogicum API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blogicum API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(&config).await?;

    #[cfg(feature = "auth")]
    let token_service: std::sync::Arc<dyn blog_core::ports::TokenService> =
        std::sync::Arc::new(blog_infra::JwtTokenService::from_env());

    #[cfg(not(feature = "auth"))]
    tracing::warn!("Built without auth feature - every request is anonymous");

    // Start HTTP server
    HttpServer::new(move || {
        let app = App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config());

        #[cfg(feature = "auth")]
        let app = app.app_data(web::Data::new(token_service.clone()));

        app.configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
