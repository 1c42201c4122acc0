//! Database query functions (Data Access Objects).
//!
//! This module centralizes all direct database operations behind the
//! `UserRepository` trait, abstracting the query logic from higher-level
//! services and API handlers. A Postgres implementation backs the live
//! server; an in-memory implementation backs tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use super::models::{NewUser, User};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("email already taken")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("internal repository error")]
    Internal,
}

/// Persistence seam for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    /// Inclusive range query on birth date. Result order is whatever the
    /// store returns; callers must not rely on it.
    async fn find_by_birth_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, RepoError>;
    /// Persists a new record; the repository assigns the identifier.
    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError>;
    /// Saves an existing record (same identifier, fields replaced).
    async fn save(&self, user: User) -> Result<User, RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Postgres-backed repository.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A unique violation on the email index means the record lost the race
/// against a concurrent write; surface it as a duplicate, not a 500.
fn map_write_err(err: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepoError::DuplicateEmail;
        }
    }
    RepoError::Database(err)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, first_name, last_name, birth_date, address, phone_number \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_birth_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, RepoError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, first_name, last_name, birth_date, address, phone_number \
             FROM users WHERE birth_date BETWEEN $1 AND $2",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, first_name, last_name, birth_date, address, phone_number) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, email, first_name, last_name, birth_date, address, phone_number",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(new_user.birth_date)
        .bind(&new_user.address)
        .bind(&new_user.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_err)?;
        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET email = $2, first_name = $3, last_name = $4, \
             birth_date = $5, address = $6, phone_number = $7 WHERE id = $1 \
             RETURNING id, email, first_name, last_name, birth_date, address, phone_number",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.birth_date)
        .bind(&user.address)
        .bind(&user.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_err)?;
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// In-memory repository for tests and local development.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let users = self.users.lock().map_err(|_| RepoError::Internal)?;
        Ok(users.values().any(|user| user.email == email))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.lock().map_err(|_| RepoError::Internal)?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_birth_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, RepoError> {
        let users = self.users.lock().map_err(|_| RepoError::Internal)?;
        Ok(users
            .values()
            .filter(|user| user.birth_date >= from && user.birth_date <= to)
            .cloned()
            .collect())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut users = self.users.lock().map_err(|_| RepoError::Internal)?;
        if users.values().any(|user| user.email == new_user.email) {
            return Err(RepoError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            birth_date: new_user.birth_date,
            address: new_user.address,
            phone_number: new_user.phone_number,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().map_err(|_| RepoError::Internal)?;
        if users
            .values()
            .any(|other| other.id != user.id && other.email == user.email)
        {
            return Err(RepoError::DuplicateEmail);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.users.lock().map_err(|_| RepoError::Internal)?;
        users.remove(&id);
        Ok(())
    }
}
