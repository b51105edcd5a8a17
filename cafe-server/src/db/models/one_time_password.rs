//! One-time password record, keyed by phone number

use serde::{Deserialize, Serialize};

use super::document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimePassword {
    #[serde(default)]
    pub uid: String,
    pub phone_number: String,
    pub password_hash: String,
    pub created_at: i64,
}

document!(OneTimePassword, "one_time_password");

impl OneTimePassword {
    pub fn is_expired(&self, now: i64, ttl_millis: i64) -> bool {
        now - self.created_at > ttl_millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let otp = OneTimePassword {
            uid: "6281234567890".into(),
            phone_number: "6281234567890".into(),
            password_hash: String::new(),
            created_at: 1_000,
        };
        assert!(!otp.is_expired(1_000 + 240_000, 240_000));
        assert!(otp.is_expired(1_000 + 240_001, 240_000));
    }
}
