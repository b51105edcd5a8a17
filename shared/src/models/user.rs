//! User and authentication models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    #[serde(alias = "kasir")]
    Cashier,
    /// Lecturer
    Dosen,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Cashier => "cashier",
            Self::Dosen => "dosen",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "cashier" | "kasir" => Ok(Self::Cashier),
            "dosen" => Ok(Self::Dosen),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Public profile of an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub google_profile_picture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "phonenumber")]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token issued by login or one-time password verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Request a one-time password over WhatsApp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequest {
    #[serde(default, alias = "phonenumber")]
    pub phone_number: String,
    #[serde(default)]
    pub captcha: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpResendRequest {
    #[serde(default, alias = "phonenumber")]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    #[serde(default, alias = "phonenumber")]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
}

/// Acknowledgement that a one-time password was issued
/// Google Identity Services credential (an ID token)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSignInRequest {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpIssued {
    pub phone_number: String,
}
