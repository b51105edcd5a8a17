//! Cafe Server - ordering backend for a café
//!
//! # Module layout
//!
//! ```text
//! cafe-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── auth/          # JWT, extractor, role gate, passwords, rate limiter
//! ├── db/            # SurrealDB store, records, repositories
//! ├── orders/        # order construction, status machine, patches, views
//! ├── services/      # GitHub, Turnstile and WhatsApp clients
//! ├── api/           # HTTP handlers per resource
//! ├── routes/        # router assembly and request logging
//! └── utils/         # errors, extractors, logging, money, phone, time
//! ```

// Security logging macro - structured events on the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod routes;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use routes::{build_app, build_router};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};
