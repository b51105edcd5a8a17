//! JWT token service
//!
//! HS256 tokens whose subject is the user's phone number.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 key, at least 32 characters
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Read `JWT_*` variables
    ///
    /// Without `JWT_SECRET` a random key is generated, unless `production`
    /// is set, in which case the secret is mandatory.
    pub fn from_env(production: bool) -> Result<Self, JwtError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_SECRET_LEN => secret,
            Ok(_) => {
                return Err(JwtError::ConfigError(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                )));
            }
            Err(_) if production => {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production".to_string(),
                ));
            }
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, generating a temporary key for this process");
                generate_printable_secret()?
            }
        };

        Ok(Self {
            secret,
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(18),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "cafe-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "cafe-clients".to_string()),
        })
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Phone number of the user
    pub sub: String,
    /// Display name
    pub alias: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// 64 printable characters from the system RNG
fn generate_printable_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes)
        .map_err(|_| JwtError::ConfigError("Failed to generate a random secret".to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect())
}

#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for `phone_number`
    pub fn generate_token(&self, phone_number: &str, alias: &str, role: Role) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.config.expiration_hours);

        let claims = Claims {
            sub: phone_number.to_string(),
            alias: alias.to_string(),
            role: role.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify signature, expiry, issuer and audience
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// Token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.config.expiration_hours * 3600
    }
}

/// Caller identity resolved from a token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Phone number (token subject)
    pub id: String,
    pub alias: String,
    pub role: Role,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            role: claims.role.parse()?,
            id: claims.sub,
            alias: claims.alias,
        })
    }
}
