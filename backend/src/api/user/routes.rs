//! Defines the HTTP routes for the user profile API.
//!
//! These routes map the CRUD and birth-date-range search paths to their
//! handler functions. They are designed to be merged into the main Axum
//! router.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_user, delete_user, find_users_by_birth_date_range, get_user, partial_update_user,
    update_user,
};
use crate::AppState;

pub fn user_router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(create_user).get(find_users_by_birth_date_range),
        )
        .route(
            "/users/:user_id",
            get(get_user)
                .put(update_user)
                .patch(partial_update_user)
                .delete(delete_user),
        )
}
