//! UserHub backend library.
//!
//! Wires configuration, the database layer, the user service, and the
//! API routes into an Axum application. The binary entry point and the
//! integration tests both build the app through [`app`].

pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod services;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::services::user_service::UserService;

/// Shared per-request state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api::user::routes::user_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
