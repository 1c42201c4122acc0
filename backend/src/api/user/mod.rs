//! Module for user profile and management API endpoints.
//!
//! This module handles the HTTP surface for user records: request and
//! response models, handler functions, and route definitions.

pub mod handlers;
pub mod models;
pub mod routes;
