//! Repository Module
//!
//! Thin typed wrappers over [`DocumentStore`](super::DocumentStore), one per
//! collection.

pub mod catalog;
pub mod one_time_password;
pub mod order;
pub mod user;

pub use catalog::{BannerRepository, CategoryRepository, MenuRepository, ProductRepository};
pub use one_time_password::OneTimePasswordRepository;
pub use order::OrderRepository;
pub use user::UserRepository;

use std::time::Duration;

use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Database call exceeded {0:?}")]
    Timeout(Duration),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        // Unique index violations surface as plain database errors
        if message.contains("already contains") {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Duplicate(msg) => AppError::already_exists(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Timeout(_) => AppError::with_message(ErrorCode::DatabaseError, err.to_string()),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
