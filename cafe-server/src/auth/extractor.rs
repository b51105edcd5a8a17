//! Bearer token extractor
//!
//! Tokens come from `Authorization: Bearer <token>`, or from the bare
//! `login` header older clients send.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

const LEGACY_TOKEN_HEADER: &str = "login";

fn token_from_parts(parts: &Parts) -> Result<Option<&str>, AppError> {
    if let Some(header) = parts.headers.get(http::header::AUTHORIZATION) {
        let value = header
            .to_str()
            .map_err(|_| AppError::invalid_token("Invalid authorization header"))?;
        return JwtService::extract_from_header(value)
            .map(Some)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"));
    }

    Ok(parts
        .headers
        .get(LEGACY_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|t| !t.is_empty()))
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let Some(token) = token_from_parts(parts)? else {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
            return Err(AppError::not_authenticated());
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::try_from(claims)
                    .map_err(|e| AppError::invalid_token(format!("Malformed token claims: {e}")))?;
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = e.to_string(),
                    uri = format!("{:?}", parts.uri)
                );
                match e {
                    JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}
