use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

use super::{Result, ServerError};
use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment
///
/// | variable | default |
/// |----------|---------|
/// | HTTP_PORT | 8080 |
/// | WORK_DIR | ./data |
/// | DB_NAMESPACE / DB_NAME | cafe / orders |
/// | DB_TIMEOUT_MS | 10000 |
/// | BUSINESS_TIMEZONE | Asia/Jakarta |
/// | ENVIRONMENT | development |
/// | OTP_RATE_PER_SEC / OTP_BURST / OTP_TTL_SECS | 1 / 5 / 240 |
/// | LOG_LEVEL / LOG_JSON / LOG_DIR | info / false / unset |
///
/// `JWT_*`, `GITHUB_*`, `GOOGLE_*`, `TURNSTILE_*` and `WHATSAPP_*` are read
/// by their own sections.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root for data files; the database lives in `<work_dir>/cafe.db`
    pub work_dir: String,
    pub http_port: u16,
    /// development | production
    pub environment: String,
    pub db_namespace: String,
    pub db_name: String,
    pub db_timeout: Duration,
    /// Zone every timestamp is rendered in
    pub timezone: Tz,
    pub jwt: JwtConfig,
    pub github: GithubConfig,
    pub google: GoogleConfig,
    pub turnstile: TurnstileConfig,
    pub whatsapp: WhatsAppConfig,
    pub otp: OtpConfig,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Without a token image uploads are unavailable
    pub token: Option<String>,
    pub owner: String,
    pub repo: String,
    pub author_name: String,
    pub author_email: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// OAuth client id the ID tokens are issued for; sign-in is off without it
    pub client_id: Option<String>,
    pub certs_url: String,
}

#[derive(Debug, Clone)]
pub struct TurnstileConfig {
    pub secret: String,
    pub verify_url: String,
}

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub api_url: String,
    pub token: String,
}

#[derive(Debug, Clone, Copy)]
pub struct OtpConfig {
    pub rate_per_sec: f64,
    pub burst: u32,
    pub ttl: Duration,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load from the environment (after `.env`, see `main`)
    pub fn from_env() -> Result<Self> {
        let environment = env_or("ENVIRONMENT", "development");
        let timezone_name = env_or("BUSINESS_TIMEZONE", "Asia/Jakarta");
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| ServerError::Config(format!("Unknown time zone: {timezone_name}")))?;

        Ok(Self {
            work_dir: env_or("WORK_DIR", "./data"),
            http_port: env_parse("HTTP_PORT", 8080),
            jwt: JwtConfig::from_env(environment == "production")?,
            environment,
            db_namespace: env_or("DB_NAMESPACE", "cafe"),
            db_name: env_or("DB_NAME", "orders"),
            db_timeout: Duration::from_millis(env_parse("DB_TIMEOUT_MS", 10_000)),
            timezone,
            github: GithubConfig {
                token: std::env::var("GITHUB_TOKEN").ok(),
                owner: env_or("GITHUB_OWNER", "logiccoffee"),
                repo: env_or("GITHUB_REPO", "img"),
                author_name: env_or("GITHUB_AUTHOR_NAME", "cafe-server"),
                author_email: env_or("GITHUB_AUTHOR_EMAIL", "cafe-server@users.noreply.github.com"),
                api_base: env_or("GITHUB_API_BASE", "https://api.github.com"),
            },
            google: GoogleConfig {
                client_id: std::env::var("GOOGLE_CLIENT_ID").ok().filter(|id| !id.is_empty()),
                certs_url: env_or("GOOGLE_CERTS_URL", "https://www.googleapis.com/oauth2/v3/certs"),
            },
            turnstile: TurnstileConfig {
                secret: env_or("TURNSTILE_SECRET", ""),
                verify_url: env_or(
                    "TURNSTILE_VERIFY_URL",
                    "https://challenges.cloudflare.com/turnstile/v0/siteverify",
                ),
            },
            whatsapp: WhatsAppConfig {
                api_url: env_or("WHATSAPP_API_URL", ""),
                token: env_or("WHATSAPP_TOKEN", ""),
            },
            otp: OtpConfig {
                rate_per_sec: env_parse("OTP_RATE_PER_SEC", 1.0),
                burst: env_parse("OTP_BURST", 5),
                ttl: Duration::from_secs(env_parse("OTP_TTL_SECS", 240)),
            },
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        })
    }

    /// Environment config with a different work dir and port
    ///
    /// Mostly for tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Result<Self> {
        let mut config = Self::from_env()?;
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("cafe.db")
    }

    pub fn ensure_work_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        Ok(())
    }
}
