//! Core business logic for user profile management.
//!
//! This service orchestrates validation, the update merge, and repository
//! calls for create/read/update/delete/search, translating not-found and
//! duplicate-email conditions into typed errors. It sits between the API
//! handlers and the database layer.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::models::{NewUser, User, UserUpdate};
use crate::database::queries::{RepoError, UserRepository};
use crate::errors::ApiError;
use crate::services::validator::UserValidator;

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    validator: UserValidator,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, validator: UserValidator) -> Self {
        Self {
            repository,
            validator,
        }
    }

    /// Creates a user: age eligibility first (no store access on failure),
    /// then the duplicate-email check, then the insert. The repository
    /// assigns the identifier.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, ApiError> {
        self.validator.validate_registration(new_user.birth_date)?;

        if self.repository.exists_by_email(&new_user.email).await? {
            return Err(ApiError::DuplicateResource(new_user.email));
        }

        let email = new_user.email.clone();
        match self.repository.insert(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "user created");
                Ok(user)
            }
            // Lost the race between the existence check and the insert;
            // the unique index caught it.
            Err(RepoError::DuplicateEmail) => Err(ApiError::DuplicateResource(email)),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, ApiError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ResourceNotFound(id))
    }

    /// Serves both full and partial updates: set fields replace stored
    /// ones, unset fields are left untouched, the id is preserved.
    pub async fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User, ApiError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ResourceNotFound(id))?;

        user.merge(update);

        let email = user.email.clone();
        match self.repository.save(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "user updated");
                Ok(user)
            }
            Err(RepoError::DuplicateEmail) => Err(ApiError::DuplicateResource(email)),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), ApiError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ResourceNotFound(id))?;

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Returns every user whose birth date falls within `[from, to]`,
    /// in store-provided order.
    pub async fn find_users_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, ApiError> {
        self.validator.validate_birth_date_range(from, to)?;

        Ok(self
            .repository
            .find_by_birth_date_between(from, to)
            .await?)
    }
}
