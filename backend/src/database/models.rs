//! Rust structs that represent database table mappings.
//!
//! These models define the structure of user data as it is stored in and
//! retrieved from the database. Note that these may differ from
//! API-specific models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// A validated create payload. The identifier is assigned by the
/// repository at insert time.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// An update to an existing user. `None` means "leave unchanged".
///
/// Both the full and the partial update requests funnel into this one
/// shape; the full variant simply arrives with every scalar field set.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl User {
    /// Applies an update in place: each set field replaces the stored one,
    /// each unset field is retained. The identifier is never touched.
    ///
    /// This is a pure structural transform; values are expected to have
    /// been validated at the boundary before they get here.
    pub fn merge(&mut self, update: UserUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(birth_date) = update.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = Some(phone_number);
        }
    }
}
