//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the frontend and backend via the REST API.

pub mod auth;

pub use auth::*;
