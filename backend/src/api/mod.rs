//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the different API
//! domains; currently the user profile endpoints.

pub mod user;
