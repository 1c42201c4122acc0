//! Data structures for the user API.
//!
//! Request and response DTOs with boundary field validation. Malformed
//! fields are rejected here, per field, before anything reaches the
//! service layer; the merge downstream never sees invalid values.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{NewUser, User, UserUpdate};

const INVALID_EMAIL: &str = "Invalid email format";
const BIRTH_DATE_NOT_PAST: &str = "Birth date must be in the past";
const INVALID_PHONE: &str = "Invalid phone number format. Only numbers and '+' are allowed";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Full update: same shape as create. Absent optional fields still mean
/// "leave unchanged" once converted into a [`UserUpdate`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Partial update: any subset of fields may be supplied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialUpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        check_email(&mut errors, &self.email);
        check_birth_date(&mut errors, self.birth_date);
        check_phone(&mut errors, self.phone_number.as_deref());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        check_email(&mut errors, &self.email);
        check_birth_date(&mut errors, self.birth_date);
        check_phone(&mut errors, self.phone_number.as_deref());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl PartialUpdateUserRequest {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        if let Some(email) = &self.email {
            check_email(&mut errors, email);
        }
        if let Some(birth_date) = self.birth_date {
            check_birth_date(&mut errors, birth_date);
        }
        check_phone(&mut errors, self.phone_number.as_deref());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_email(errors: &mut HashMap<String, String>, email: &str) {
    if !valid_email(email) {
        errors.insert("email".to_string(), INVALID_EMAIL.to_string());
    }
}

fn check_birth_date(errors: &mut HashMap<String, String>, birth_date: NaiveDate) {
    if birth_date >= Utc::now().date_naive() {
        errors.insert("birthDate".to_string(), BIRTH_DATE_NOT_PAST.to_string());
    }
}

fn check_phone(errors: &mut HashMap<String, String>, phone_number: Option<&str>) {
    if let Some(phone_number) = phone_number {
        if !valid_phone(phone_number) {
            errors.insert("phoneNumber".to_string(), INVALID_PHONE.to_string());
        }
    }
}

fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Optional leading '+', then 10 to 15 digits.
fn valid_phone(phone_number: &str) -> bool {
    let digits = phone_number.strip_prefix('+').unwrap_or(phone_number);
    (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            birth_date: request.birth_date,
            address: request.address,
            phone_number: request.phone_number,
        }
    }
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        UserUpdate {
            email: Some(request.email),
            first_name: Some(request.first_name),
            last_name: Some(request.last_name),
            birth_date: Some(request.birth_date),
            address: request.address,
            phone_number: request.phone_number,
        }
    }
}

impl From<PartialUpdateUserRequest> for UserUpdate {
    fn from(request: PartialUpdateUserRequest) -> Self {
        UserUpdate {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            birth_date: request.birth_date,
            address: request.address,
            phone_number: request.phone_number,
        }
    }
}

/// Public view of a user record. Unset optional fields are omitted from
/// the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            address: user.address,
            phone_number: user.phone_number,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SingleUserResponse {
    pub data: UserDto,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub data: Vec<UserDto>,
}

/// Query parameters for the birth-date range search.
#[derive(Debug, Deserialize)]
pub struct BirthDateRangeParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
}
