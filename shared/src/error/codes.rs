//! Error codes for the café backend
//!
//! Codes are grouped by leading digit:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog errors (menu, category, banner, product, images)
//! - 8xxx: Account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a plain `u16` so clients can switch on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid identifier or value format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Update did not change anything
    NotModified = 9,

    // ==================== 1xxx: Auth ====================
    /// No credential was presented
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password or one-time password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Captcha verification rejected the request
    CaptchaFailed = 1008,
    /// One-time password has expired
    OneTimePasswordExpired = 1009,
    /// Too many attempts for the same key
    RateLimited = 1010,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Caller's role is not in the allowed set
    RoleRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Status change violates the order state machine
    InvalidStatusTransition = 4010,
    /// Requested status is not a known order status
    InvalidOrderStatus = 4011,
    /// queue_number cannot be changed after creation
    QueueNumberImmutable = 4012,

    // ==================== 5xxx: Payment ====================
    /// Payment method is not accepted
    PaymentInvalidMethod = 5003,

    // ==================== 6xxx: Catalog ====================
    /// Menu item not found
    MenuNotFound = 6001,
    /// Menu status is not one of the known values
    MenuInvalidStatus = 6002,
    /// Category not found
    CategoryNotFound = 6101,
    /// Banner not found
    BannerNotFound = 6201,
    /// Product not found
    ProductNotFound = 6301,
    /// Uploaded file is not a supported image
    ImageInvalid = 6401,
    /// Uploaded file exceeds the size limit
    ImageTooLarge = 6402,

    // ==================== 8xxx: Account ====================
    /// User not found
    UserNotFound = 8001,
    /// Email or phone number already registered
    UserAlreadyExists = 8002,
    /// Account has no phone number linked yet
    PhoneNumberRequired = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error talking to an external service
    NetworkError = 9003,
    /// Configuration error
    ConfigError = 9005,
    /// External service answered with an error
    UpstreamError = 9006,
    /// External service is not configured
    ServiceUnavailable = 9007,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Developer-facing English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::NotModified => "No changes were applied",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::CaptchaFailed => "Invalid captcha",
            ErrorCode::OneTimePasswordExpired => "One-time password has expired",
            ErrorCode::RateLimited => "Too many requests",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Role not allowed",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidStatusTransition => "Order status transition not allowed",
            ErrorCode::InvalidOrderStatus => "Invalid order status",
            ErrorCode::QueueNumberImmutable => "queue_number cannot be modified",

            // Payment
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",

            // Catalog
            ErrorCode::MenuNotFound => "Menu not found",
            ErrorCode::MenuInvalidStatus => "Invalid menu status",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::BannerNotFound => "Banner not found",
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ImageInvalid => "Unsupported image",
            ErrorCode::ImageTooLarge => "Image too large",

            // Account
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserAlreadyExists => "User already exists",
            ErrorCode::PhoneNumberRequired => "Scan the QR code to link a phone number",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::UpstreamError => "External service error",
            ErrorCode::ServiceUnavailable => "Service unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::NotModified),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1008 => Ok(ErrorCode::CaptchaFailed),
            1009 => Ok(ErrorCode::OneTimePasswordExpired),
            1010 => Ok(ErrorCode::RateLimited),

            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            4001 => Ok(ErrorCode::OrderNotFound),
            4010 => Ok(ErrorCode::InvalidStatusTransition),
            4011 => Ok(ErrorCode::InvalidOrderStatus),
            4012 => Ok(ErrorCode::QueueNumberImmutable),

            5003 => Ok(ErrorCode::PaymentInvalidMethod),

            6001 => Ok(ErrorCode::MenuNotFound),
            6002 => Ok(ErrorCode::MenuInvalidStatus),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6201 => Ok(ErrorCode::BannerNotFound),
            6301 => Ok(ErrorCode::ProductNotFound),
            6401 => Ok(ErrorCode::ImageInvalid),
            6402 => Ok(ErrorCode::ImageTooLarge),

            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UserAlreadyExists),
            8003 => Ok(ErrorCode::PhoneNumberRequired),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::UpstreamError),
            9007 => Ok(ErrorCode::ServiceUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
