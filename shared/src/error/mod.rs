//! Unified error system
//!
//! - [`ErrorCode`]: numeric codes shared by every endpoint
//! - [`ErrorCategory`]: classification by code range
//! - [`AppError`]: code + message + optional details
//! - [`ApiResponse`]: the JSON envelope every endpoint returns
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::PaymentInvalidMethod, "only Cash is accepted")
//!     .with_detail("payment_method", "Card");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(5003));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
