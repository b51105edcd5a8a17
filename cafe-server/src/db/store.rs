//! Generic document access
//!
//! Each record type names its collection through [`Document`]. The store
//! assigns identities on insert and wraps every call in a timeout.

use std::future::IntoFuture;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

use super::{RepoError, RepoResult};

/// A record stored in its own collection
///
/// The identity lives in the `uid` field of the record and doubles as the
/// SurrealDB record key.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn assign_id(&mut self, id: String);
}

/// Equality filter with optional ordering
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(&'static str, Value)>,
    order_by: Option<&'static str>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `field = value`
    pub fn eq(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push((field, value.into()));
        self
    }

    pub fn order_by(mut self, field: &'static str) -> Self {
        self.order_by = Some(field);
        self
    }

    fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .conditions
            .iter()
            .enumerate()
            .map(|(i, (field, _))| format!("{field} = $p{i}"))
            .collect();
        format!(" WHERE {}", parts.join(" AND "))
    }

    fn order_clause(&self) -> String {
        self.order_by
            .map(|field| format!(" ORDER BY {field}"))
            .unwrap_or_default()
    }

    fn bindings(&self) -> impl Iterator<Item = (String, Value)> + '_ {
        self.conditions
            .iter()
            .enumerate()
            .map(|(i, (_, value))| (format!("p{i}"), value.clone()))
    }
}

#[derive(Clone)]
pub struct DocumentStore {
    db: Surreal<Db>,
    timeout: Duration,
}

impl DocumentStore {
    pub fn new(db: Surreal<Db>, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    async fn bounded<F, T>(&self, operation: F) -> RepoResult<T>
    where
        F: IntoFuture<Output = surrealdb::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result.map_err(RepoError::from),
            Err(_) => Err(RepoError::Timeout(self.timeout)),
        }
    }

    /// Insert a new document under a fresh identity
    pub async fn insert<T: Document>(&self, mut doc: T) -> RepoResult<T> {
        let key = Uuid::new_v4().to_string();
        doc.assign_id(key.clone());
        let created: Option<T> = self
            .bounded(self.db.create((T::COLLECTION, key)).content(doc))
            .await?;
        created.ok_or_else(|| {
            RepoError::Database(format!("insert into {} returned nothing", T::COLLECTION))
        })
    }

    /// Create or overwrite the document stored under `key`
    pub async fn upsert<T: Document>(&self, key: &str, mut doc: T) -> RepoResult<T> {
        doc.assign_id(key.to_owned());
        let stored: Option<T> = self
            .bounded(self.db.upsert((T::COLLECTION, key.to_owned())).content(doc))
            .await?;
        stored.ok_or_else(|| {
            RepoError::Database(format!("upsert into {} returned nothing", T::COLLECTION))
        })
    }

    pub async fn find_by_id<T: Document>(&self, id: &str) -> RepoResult<Option<T>> {
        self.bounded(self.db.select((T::COLLECTION, id.to_owned())))
            .await
    }

    pub async fn find_all<T: Document>(&self, filter: &Filter) -> RepoResult<Vec<T>> {
        let sql = format!(
            "SELECT * FROM type::table($table){}{}",
            filter.where_clause(),
            filter.order_clause()
        );
        let mut query = self.db.query(sql).bind(("table", T::COLLECTION));
        for binding in filter.bindings() {
            query = query.bind(binding);
        }
        let mut response = self.bounded(query).await?;
        Ok(response.take(0)?)
    }

    pub async fn find_one<T: Document>(&self, filter: &Filter) -> RepoResult<Option<T>> {
        let sql = format!(
            "SELECT * FROM type::table($table){} LIMIT 1",
            filter.where_clause()
        );
        let mut query = self.db.query(sql).bind(("table", T::COLLECTION));
        for binding in filter.bindings() {
            query = query.bind(binding);
        }
        let mut response = self.bounded(query).await?;
        let rows: Vec<T> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Merge `patch` into an existing document; `None` if it does not exist
    pub async fn merge<T, P>(&self, id: &str, patch: P) -> RepoResult<Option<T>>
    where
        T: Document,
        P: Serialize + 'static,
    {
        self.bounded(self.db.update((T::COLLECTION, id.to_owned())).merge(patch))
            .await
    }

    /// Merge `patch` only while every condition in `guard` still holds
    ///
    /// Returns `None` when the document is missing or the guard no longer
    /// matches. The check and the write happen in one statement.
    pub async fn merge_if<T, P>(&self, id: &str, patch: P, guard: &Filter) -> RepoResult<Option<T>>
    where
        T: Document,
        P: Serialize + 'static,
    {
        let sql = format!(
            "UPDATE $thing MERGE $patch{} RETURN AFTER",
            guard.where_clause()
        );
        let mut query = self
            .db
            .query(sql)
            .bind(("thing", RecordId::from_table_key(T::COLLECTION, id.to_owned())))
            .bind(("patch", patch));
        for binding in guard.bindings() {
            query = query.bind(binding);
        }
        let mut response = self.bounded(query).await?;
        let rows: Vec<T> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Replace the whole document, keeping its identity
    pub async fn replace<T: Document>(&self, doc: T) -> RepoResult<Option<T>> {
        let key = doc.id().to_owned();
        self.bounded(self.db.update((T::COLLECTION, key)).content(doc))
            .await
    }

    /// Delete by identity; returns the removed document
    pub async fn delete<T: Document>(&self, id: &str) -> RepoResult<Option<T>> {
        self.bounded(self.db.delete((T::COLLECTION, id.to_owned())))
            .await
    }
}
