//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine). Every collection is accessed through
//! [`DocumentStore`], which bounds each call with the configured timeout.

pub mod models;
pub mod repository;
pub mod store;

pub use repository::{RepoError, RepoResult};
pub use store::{Document, DocumentStore, Filter};

use std::path::Path;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use uuid::Uuid;

use crate::utils::{AppError, AppResult};

/// Unique indexes; safe to run on every start
const SCHEMA: &str = "
    DEFINE INDEX IF NOT EXISTS user_phone ON TABLE user FIELDS phone_number UNIQUE;
    DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB store at `path`
    pub async fn open(path: impl AsRef<Path>, namespace: &str, database: &str) -> AppResult<Self> {
        let path = path.as_ref();
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        tracing::info!(path = %path.display(), namespace, database, "Database connection established");
        Ok(Self { db })
    }

    /// Document store bound to this database
    pub fn store(&self, timeout: Duration) -> DocumentStore {
        DocumentStore::new(self.db.clone(), timeout)
    }
}

/// Validate an identity taken from a path or query string
///
/// Identities are UUIDs; anything else is rejected before touching storage.
pub fn parse_id(raw: &str, resource: &str) -> AppResult<String> {
    Uuid::try_parse(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| {
            AppError::invalid_format(format!("Invalid {resource} id: {raw}"))
                .with_detail("resource", resource)
        })
}
