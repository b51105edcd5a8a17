//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotModified => StatusCode::NOT_MODIFIED,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::MenuNotFound
            | Self::CategoryNotFound
            | Self::BannerNotFound
            | Self::ProductNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::UserAlreadyExists => StatusCode::CONFLICT,

            // 401 Unauthorized: the caller proved the wrong secret
            Self::InvalidCredentials
            | Self::CaptchaFailed
            | Self::OneTimePasswordExpired
            | Self::PhoneNumberRequired => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden: missing or unverifiable bearer credential, denied role,
            // immutable field
            Self::NotAuthenticated
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::PermissionDenied
            | Self::RoleRequired
            | Self::QueueNumberImmutable => StatusCode::FORBIDDEN,

            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,

            Self::UpstreamError => StatusCode::BAD_GATEWAY,

            Self::NetworkError | Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation and state machine errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
