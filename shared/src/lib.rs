//! Shared types for the café backend
//!
//! Error codes, the response envelope, and the request/response models
//! used by `cafe-server` and its clients.

pub mod error;
pub mod models;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
