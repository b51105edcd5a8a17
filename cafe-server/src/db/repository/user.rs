//! User Repository

use super::{RepoError, RepoResult};
use crate::db::models::User;
use crate::db::{DocumentStore, Filter};

#[derive(Clone)]
pub struct UserRepository {
    store: DocumentStore,
}

impl UserRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub async fn find_by_phone(&self, phone_number: &str) -> RepoResult<Option<User>> {
        self.store
            .find_one(&Filter::new().eq("phone_number", phone_number))
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.store
            .find_one(&Filter::new().eq("email", email))
            .await
    }

    /// Link a Google account to an existing user
    pub async fn link_google(&self, uid: &str, email: &str, picture: &str, now: i64) -> RepoResult<Option<User>> {
        self.store
            .merge(
                uid,
                serde_json::json!({
                    "email": email,
                    "google_profile_picture": picture,
                    "updated_at": now,
                }),
            )
            .await
    }

    /// Create a user, rejecting a taken email or phone number
    pub async fn create(&self, user: User) -> RepoResult<User> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        if self.find_by_phone(&user.phone_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Phone number '{}' is already registered",
                user.phone_number
            )));
        }
        self.store.insert(user).await
    }
}
