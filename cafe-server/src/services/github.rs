//! Image hosting on a GitHub repository (contents API)

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use thiserror::Error;

use crate::core::config::GithubConfig;
use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("Image host is not configured")]
    NotConfigured,

    #[error("Image host request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Image host answered {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected image host response: {0}")]
    MalformedResponse(String),
}

impl From<ImageHostError> for AppError {
    fn from(err: ImageHostError) -> Self {
        match err {
            ImageHostError::NotConfigured => {
                AppError::with_message(ErrorCode::ServiceUnavailable, err.to_string())
            }
            other => AppError::upstream(other.to_string()),
        }
    }
}

/// Stores files and returns their public URL
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Write `content` at `path`, replacing an existing file
    async fn put(&self, path: &str, content: Vec<u8>) -> Result<String, ImageHostError>;
}

#[derive(Serialize)]
struct Committer<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct PutContents<'a> {
    message: String,
    content: String,
    committer: Committer<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

pub struct GithubUploader {
    client: reqwest::Client,
    config: GithubConfig,
}

impl GithubUploader {
    pub fn new(config: GithubConfig) -> Self {
        Self {
            client: super::http_client(),
            config,
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            path.trim_start_matches('/')
        )
    }

    /// Blob sha of an existing file, needed to overwrite it
    async fn existing_sha(&self, url: &str, token: &str) -> Result<Option<String>, ImageHostError> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(ImageHostError::Upstream {
                status: resp.status().as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(body["sha"].as_str().map(String::from))
    }
}

#[async_trait]
impl ImageHost for GithubUploader {
    async fn put(&self, path: &str, content: Vec<u8>) -> Result<String, ImageHostError> {
        let token = self
            .config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ImageHostError::NotConfigured)?;

        let url = self.contents_url(path);
        let sha = self.existing_sha(&url, token).await?;
        let size = content.len();

        let body = PutContents {
            message: format!("Upload {path}"),
            content: STANDARD.encode(&content),
            committer: Committer {
                name: &self.config.author_name,
                email: &self.config.author_email,
            },
            sha,
        };

        let resp = self
            .client
            .put(&url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(path, status = status.as_u16(), "Image upload rejected by host");
            return Err(ImageHostError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = resp.json().await?;
        let html_url = body["content"]["html_url"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| ImageHostError::MalformedResponse(body.to_string()))?;

        tracing::info!(path, size, url = %html_url, "Image uploaded");
        Ok(html_url)
    }
}
