//! Error re-exports and response helpers
//!
//! ```ignore
//! Err(AppError::not_found("order"))
//! Ok(ok(view))
//! ```

use axum::Json;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Wrap data in the success envelope
pub fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Wrap data in the success envelope with a custom message
pub fn ok_with_message<T>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
