//! # Model Layer
//!
//! Persistent entities and the stores that own them.

pub mod store;
