use thiserror::Error;

/// Failures while starting or running the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<crate::auth::JwtError> for ServerError {
    fn from(err: crate::auth::JwtError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<crate::utils::AppError> for ServerError {
    fn from(err: crate::utils::AppError) -> Self {
        ServerError::Database(err.message)
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
