//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations and orchestrate interactions between different parts of the
//! application, such as validating registrations or merging updates into
//! stored records.

pub mod user_service;
pub mod validator;
