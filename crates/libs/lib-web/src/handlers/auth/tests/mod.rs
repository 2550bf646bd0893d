//! # Auth Handler Tests
//!
//! Test suite for the authentication endpoints, driven through the real
//! router against an in-memory database.

mod register;

use crate::test_utils::{login_token, register_user, send, setup_test_db, test_app};
use axum::http::StatusCode;
use serde_json::json;
