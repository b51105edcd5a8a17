//! Google sign-in (ID token verification)
//!
//! Tokens are RS256 JWTs signed with one of Google's rotating keys. The key
//! set is fetched from `certs_url` and cached for [`KEY_SET_TTL`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;

use crate::core::config::GoogleConfig;
use crate::utils::{AppError, ErrorCode};

const KEY_SET_TTL: Duration = Duration::from_secs(3600);
const ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Claims taken from a verified ID token
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleIdentity {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
}

#[derive(Debug, Error)]
pub enum GoogleTokenError {
    #[error("Invalid Google token: {0}")]
    Rejected(String),

    #[error("Google sign-in unavailable: {0}")]
    Unavailable(String),
}

impl From<GoogleTokenError> for AppError {
    fn from(err: GoogleTokenError) -> Self {
        match err {
            GoogleTokenError::Rejected(_) => {
                AppError::with_message(ErrorCode::InvalidCredentials, err.to_string())
            }
            GoogleTokenError::Unavailable(_) => {
                AppError::with_message(ErrorCode::ServiceUnavailable, err.to_string())
            }
        }
    }
}

#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, GoogleTokenError>;
}

pub struct GoogleVerifier {
    client: reqwest::Client,
    config: GoogleConfig,
    keys: RwLock<Option<(Instant, Arc<JwkSet>)>>,
}

impl GoogleVerifier {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            client: super::http_client(),
            config,
            keys: RwLock::new(None),
        }
    }

    async fn key_set(&self) -> Result<Arc<JwkSet>, GoogleTokenError> {
        let cached = self
            .keys
            .read()
            .as_ref()
            .filter(|(fetched_at, _)| fetched_at.elapsed() < KEY_SET_TTL)
            .map(|(_, keys)| keys.clone());
        if let Some(keys) = cached {
            return Ok(keys);
        }

        let keys: JwkSet = self
            .client
            .get(&self.config.certs_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| GoogleTokenError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| GoogleTokenError::Unavailable(e.to_string()))?;

        let keys = Arc::new(keys);
        *self.keys.write() = Some((Instant::now(), keys.clone()));
        tracing::debug!(count = keys.keys.len(), "Fetched Google signing keys");
        Ok(keys)
    }
}

#[async_trait]
impl GoogleTokenVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, GoogleTokenError> {
        let id_token = id_token.trim();
        if id_token.is_empty() {
            return Err(GoogleTokenError::Rejected("empty token".into()));
        }
        let Some(client_id) = self.config.client_id.as_deref() else {
            return Err(GoogleTokenError::Unavailable("GOOGLE_CLIENT_ID is not set".into()));
        };

        let header = decode_header(id_token).map_err(|e| GoogleTokenError::Rejected(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| GoogleTokenError::Rejected("missing key id".into()))?;

        let keys = self.key_set().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| GoogleTokenError::Rejected(format!("unknown key id {kid}")))?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| GoogleTokenError::Rejected(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[client_id]);
        validation.set_issuer(&ISSUERS);

        let identity = decode::<GoogleIdentity>(id_token, &key, &validation)
            .map_err(|e| GoogleTokenError::Rejected(e.to_string()))?
            .claims;

        if identity.email.trim().is_empty() {
            return Err(GoogleTokenError::Rejected("token carries no email".into()));
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier(client_id: Option<&str>) -> GoogleVerifier {
        GoogleVerifier::new(GoogleConfig {
            client_id: client_id.map(str::to_string),
            certs_url: "http://127.0.0.1:9/unused".into(),
        })
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected_locally() {
        assert!(matches!(
            verifier(Some("client")).verify(" ").await,
            Err(GoogleTokenError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_client_is_unavailable() {
        assert!(matches!(
            verifier(None).verify("a.b.c").await,
            Err(GoogleTokenError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected_before_fetching_keys() {
        assert!(matches!(
            verifier(Some("client")).verify("not-a-jwt").await,
            Err(GoogleTokenError::Rejected(_))
        ));
    }

    #[test]
    fn test_error_mapping() {
        let app: AppError = GoogleTokenError::Rejected("bad".into()).into();
        assert_eq!(app.http_status().as_u16(), 401);
        let app: AppError = GoogleTokenError::Unavailable("down".into()).into();
        assert_eq!(app.http_status().as_u16(), 503);
    }
}
