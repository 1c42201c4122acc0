//! Main entry point for the UserHub backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection pool, and registers all API routes.
//! It orchestrates the application's startup and defines its overall structure.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use userhub::config::AppConfig;
use userhub::database::queries::PgUserRepository;
use userhub::services::user_service::UserService;
use userhub::services::validator::UserValidator;
use userhub::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let pool = userhub::database::connect(&config.database_url).await?;

    let state = AppState {
        user_service: UserService::new(
            Arc::new(PgUserRepository::new(pool)),
            UserValidator::new(config.minimum_age),
        ),
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
