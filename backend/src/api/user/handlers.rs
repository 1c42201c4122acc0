//! Handler functions for user profile and management API endpoints.
//!
//! These functions process requests for user data, run boundary field
//! validation, delegate business logic to the `UserService`, and format
//! the responses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::models::{
    BirthDateRangeParams, CreateUserRequest, PartialUpdateUserRequest, SingleUserResponse,
    UpdateUserRequest, UserListResponse,
};
use crate::errors::ApiError;
use crate::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<SingleUserResponse>), ApiError> {
    request.validate().map_err(ApiError::FieldValidation)?;

    let user = state.user_service.create_user(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SingleUserResponse { data: user.into() }),
    ))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SingleUserResponse>, ApiError> {
    let user = state.user_service.get_user(user_id).await?;
    Ok(Json(SingleUserResponse { data: user.into() }))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<SingleUserResponse>, ApiError> {
    request.validate().map_err(ApiError::FieldValidation)?;

    let user = state
        .user_service
        .update_user(user_id, request.into())
        .await?;
    Ok(Json(SingleUserResponse { data: user.into() }))
}

pub async fn partial_update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<PartialUpdateUserRequest>,
) -> Result<Json<SingleUserResponse>, ApiError> {
    request.validate().map_err(ApiError::FieldValidation)?;

    let user = state
        .user_service
        .update_user(user_id, request.into())
        .await?;
    Ok(Json(SingleUserResponse { data: user.into() }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn find_users_by_birth_date_range(
    State(state): State<AppState>,
    Query(params): Query<BirthDateRangeParams>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = state
        .user_service
        .find_users_by_birth_date_range(params.from, params.to)
        .await?;
    Ok(Json(UserListResponse {
        data: users.into_iter().map(Into::into).collect(),
    }))
}
