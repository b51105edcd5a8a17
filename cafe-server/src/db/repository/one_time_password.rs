//! One-time password repository
//!
//! At most one pending password per phone number; issuing a new one
//! overwrites the previous.

use super::RepoResult;
use crate::db::DocumentStore;
use crate::db::models::OneTimePassword;

#[derive(Clone)]
pub struct OneTimePasswordRepository {
    store: DocumentStore,
}

impl OneTimePasswordRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub async fn save(&self, otp: OneTimePassword) -> RepoResult<OneTimePassword> {
        let key = otp.phone_number.clone();
        self.store.upsert(&key, otp).await
    }

    pub async fn find(&self, phone_number: &str) -> RepoResult<Option<OneTimePassword>> {
        self.store.find_by_id(phone_number).await
    }

    /// Remove the pending password; returns whether one existed
    pub async fn consume(&self, phone_number: &str) -> RepoResult<bool> {
        let removed: Option<OneTimePassword> = self.store.delete(phone_number).await?;
        Ok(removed.is_some())
    }
}
