//! User account record

use serde::{Deserialize, Serialize};
use shared::models::{Role, UserProfile};

use super::document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub uid: String,
    pub name: String,
    /// Normalized form, see [`crate::utils::phone`]
    pub phone_number: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub password_hash: String,
    pub role: Role,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub google_profile_picture: String,
    pub created_at: i64,
    pub updated_at: i64,
}

document!(User, "user");

impl User {
    pub fn new(name: String, phone_number: String, email: String, password_hash: String, role: Role, now: i64) -> Self {
        Self {
            uid: String::new(),
            name,
            phone_number,
            email,
            password_hash,
            role,
            google_profile_picture: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.uid,
            name: user.name,
            phone_number: user.phone_number,
            email: user.email,
            role: user.role,
            google_profile_picture: user.google_profile_picture,
        }
    }
}
