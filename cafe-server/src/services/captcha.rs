//! Captcha verification (Cloudflare Turnstile)

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::core::config::TurnstileConfig;
use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum CaptchaError {
    #[error("Captcha rejected")]
    Rejected,

    #[error("Captcha service unavailable: {0}")]
    Unavailable(String),
}

impl From<CaptchaError> for AppError {
    fn from(err: CaptchaError) -> Self {
        match err {
            CaptchaError::Rejected => AppError::new(ErrorCode::CaptchaFailed),
            CaptchaError::Unavailable(_) => {
                AppError::with_message(ErrorCode::ServiceUnavailable, err.to_string())
            }
        }
    }
}

#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, response: &str) -> Result<(), CaptchaError>;
}

#[derive(Deserialize)]
struct SiteVerify {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

pub struct TurnstileVerifier {
    client: reqwest::Client,
    config: TurnstileConfig,
}

impl TurnstileVerifier {
    pub fn new(config: TurnstileConfig) -> Self {
        Self {
            client: super::http_client(),
            config,
        }
    }
}

#[async_trait]
impl CaptchaVerifier for TurnstileVerifier {
    async fn verify(&self, response: &str) -> Result<(), CaptchaError> {
        if response.trim().is_empty() {
            return Err(CaptchaError::Rejected);
        }

        let result: SiteVerify = self
            .client
            .post(&self.config.verify_url)
            .form(&[("secret", self.config.secret.as_str()), ("response", response)])
            .send()
            .await
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?;

        if result.success {
            Ok(())
        } else {
            tracing::debug!(errors = ?result.error_codes, "Captcha rejected");
            Err(CaptchaError::Rejected)
        }
    }
}
