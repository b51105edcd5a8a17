//! Clients for external services
//!
//! Each client sits behind a trait so handlers can be exercised without
//! network access.

pub mod captcha;
pub mod github;
pub mod google;
pub mod whatsapp;

pub use captcha::{CaptchaError, CaptchaVerifier, TurnstileVerifier};
pub use github::{GithubUploader, ImageHost, ImageHostError};
pub use google::{GoogleIdentity, GoogleTokenError, GoogleTokenVerifier, GoogleVerifier};
pub use whatsapp::{PasswordSender, SendError, WhatsAppSender};

use std::time::Duration;

/// Upper bound for any outbound call
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("cafe-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}
