use std::sync::Arc;
use std::time::Duration;

use crate::auth::{JwtService, RateLimiterRegistry};
use crate::core::{Config, Result};
use crate::db::repository::{
    BannerRepository, CategoryRepository, MenuRepository, OneTimePasswordRepository,
    OrderRepository, ProductRepository, UserRepository,
};
use crate::db::{DbService, DocumentStore};
use crate::orders::OrderService;
use crate::services::{
    CaptchaVerifier, GithubUploader, GoogleTokenVerifier, GoogleVerifier, ImageHost,
    PasswordSender, TurnstileVerifier, WhatsAppSender,
};

/// Interval of the rate limiter sweep
const LIMITER_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Shared server state
///
/// Cheap to clone; every field is a handle.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub store: DocumentStore,
    pub jwt_service: Arc<JwtService>,
    /// Per-phone limiter for one-time password verification
    pub otp_limiter: RateLimiterRegistry,
    pub image_host: Arc<dyn ImageHost>,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub google: Arc<dyn GoogleTokenVerifier>,
    pub password_sender: Arc<dyn PasswordSender>,
}

impl ServerState {
    /// Open the database and build the service clients
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir()?;

        let db = DbService::open(config.database_path(), &config.db_namespace, &config.db_name).await?;
        let store = db.store(config.db_timeout);

        Ok(Self {
            config: Arc::new(config.clone()),
            db,
            store,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            otp_limiter: RateLimiterRegistry::new(config.otp.rate_per_sec, config.otp.burst),
            image_host: Arc::new(GithubUploader::new(config.github.clone())),
            captcha: Arc::new(TurnstileVerifier::new(config.turnstile.clone())),
            google: Arc::new(GoogleVerifier::new(config.google.clone())),
            password_sender: Arc::new(WhatsAppSender::new(config.whatsapp.clone())),
        })
    }

    pub fn with_image_host(mut self, host: Arc<dyn ImageHost>) -> Self {
        self.image_host = host;
        self
    }

    pub fn with_captcha(mut self, captcha: Arc<dyn CaptchaVerifier>) -> Self {
        self.captcha = captcha;
        self
    }

    pub fn with_google_verifier(mut self, google: Arc<dyn GoogleTokenVerifier>) -> Self {
        self.google = google;
        self
    }

    pub fn with_password_sender(mut self, sender: Arc<dyn PasswordSender>) -> Self {
        self.password_sender = sender;
        self
    }

    /// Periodic housekeeping; call once before serving
    pub fn start_background_tasks(&self) {
        let limiter = self.otp_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(LIMITER_SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                limiter.cleanup(LIMITER_SWEEP_INTERVAL);
            }
        });
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(
            OrderRepository::new(self.store.clone()),
            self.user_repo(),
            self.config.timezone,
        )
    }

    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    pub fn otp_repo(&self) -> OneTimePasswordRepository {
        OneTimePasswordRepository::new(self.store.clone())
    }

    pub fn menu_repo(&self) -> MenuRepository {
        MenuRepository::new(self.store.clone(), "name")
    }

    pub fn category_repo(&self) -> CategoryRepository {
        CategoryRepository::new(self.store.clone(), "name")
    }

    pub fn banner_repo(&self) -> BannerRepository {
        BannerRepository::new(self.store.clone(), "name")
    }

    pub fn product_repo(&self) -> ProductRepository {
        ProductRepository::new(self.store.clone(), "name")
    }
}
