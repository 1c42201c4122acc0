//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::database::queries::RepoError;

/// Application error taxonomy. Each variant maps to a fixed HTTP status;
/// service-layer failures propagate unmodified up to the boundary, where
/// `IntoResponse` renders them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request fields, keyed by field name.
    #[error("invalid request fields")]
    FieldValidation(HashMap<String, String>),
    #[error("User is not old enough to register")]
    RegistrationRestriction,
    #[error("Invalid date range. Start date must be before or equal to end date")]
    InvalidDateRange,
    #[error("User with email {0} already exists")]
    DuplicateResource(String),
    #[error("User {0} not found")]
    ResourceNotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::FieldValidation(_)
            | ApiError::RegistrationRestriction
            | ApiError::InvalidDateRange => StatusCode::BAD_REQUEST,
            ApiError::DuplicateResource(_) => StatusCode::CONFLICT,
            ApiError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub errors: HashMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let errors = match self {
            ApiError::FieldValidation(errors) => errors,
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed with internal error");
                HashMap::from([("error".to_string(), "Internal server error".to_string())])
            }
            other => HashMap::from([("error".to_string(), other.to_string())]),
        };

        let body = ErrorResponse {
            status: status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            errors,
            timestamp: Utc::now(),
        };

        tracing::info!(
            status = %body.status,
            errors = ?body.errors,
            timestamp = %body.timestamp,
            "request rejected"
        );

        (status, Json(body)).into_response()
    }
}
