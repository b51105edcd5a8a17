//! One-time password delivery over a WhatsApp gateway

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::core::config::WhatsAppConfig;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("WhatsApp gateway is not configured")]
    NotConfigured,

    #[error("WhatsApp gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("WhatsApp gateway answered {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait PasswordSender: Send + Sync {
    async fn send(&self, phone_number: &str, password: &str) -> Result<(), SendError>;
}

#[derive(Serialize)]
struct TextMessage<'a> {
    to: &'a str,
    #[serde(rename = "isgroup")]
    is_group: bool,
    messages: String,
}

pub struct WhatsAppSender {
    client: reqwest::Client,
    config: WhatsAppConfig,
}

impl WhatsAppSender {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            client: super::http_client(),
            config,
        }
    }
}

fn password_message(password: &str) -> String {
    format!("Your login password: {password}\nIt expires in a few minutes. Do not share it with anyone.")
}

#[async_trait]
impl PasswordSender for WhatsAppSender {
    async fn send(&self, phone_number: &str, password: &str) -> Result<(), SendError> {
        if self.config.api_url.is_empty() {
            return Err(SendError::NotConfigured);
        }

        let resp = self
            .client
            .post(&self.config.api_url)
            .header("Token", &self.config.token)
            .json(&TextMessage {
                to: phone_number,
                is_group: false,
                messages: password_message(password),
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SendError::Rejected(resp.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_gateway() {
        let sender = WhatsAppSender::new(WhatsAppConfig {
            api_url: String::new(),
            token: String::new(),
        });
        assert!(matches!(
            sender.send("6281234567890", "abc").await,
            Err(SendError::NotConfigured)
        ));
    }

    #[test]
    fn test_message_contains_password() {
        assert!(password_message("Xy12").contains("Xy12"));
    }
}
