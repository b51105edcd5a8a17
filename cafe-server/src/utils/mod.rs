//! Utility module
//!
//! - [`AppError`] / [`ApiResponse`] (from `shared::error`)
//! - [`ValidJson`] body extractor
//! - logging, time zone, currency and phone number helpers

pub mod error;
pub mod extract;
pub mod image;
pub mod logger;
pub mod money;
pub mod phone;
pub mod time;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{ok, ok_with_message};
pub use extract::ValidJson;
