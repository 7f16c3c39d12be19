//! API Gateway Library
//!
//! HTTP REST API for account registration and sign-in, backed by the
//! in-process account service.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use account_service_lib::config::AccountServiceConfig;
use account_service_lib::infra::Database;
use account_service_lib::{AccountServices, MigrateAction};
use common::DatabaseConfig;

use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server: connect, apply pending migrations and serve.
pub async fn run_server(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = AccountServiceConfig::from_env()?;

    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Create services and app state
    let services = AccountServices::from_connection(db.get_connection(), &config)?;
    let state = AppState::new(&services, db);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env();
    account_service_lib::run_migrations(&config, action).await?;
    Ok(())
}
