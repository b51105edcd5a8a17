//! Authentication API
//!
//! | path | method | auth |
//! |------|--------|------|
//! | /api/auth/register | POST | none |
//! | /api/auth/login | POST | none |
//! | /api/auth/otp | POST | captcha |
//! | /api/auth/otp/resend | POST | none |
//! | /api/auth/otp/verify | POST | none, rate limited per phone |
//! | /api/auth/google | POST | Google ID token |
//! | /api/auth/google/register | POST | bearer + Google ID token |
//! | /api/auth/me | GET | bearer |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/otp", post(handler::request_otp))
        .route("/otp/resend", post(handler::resend_otp))
        .route("/otp/verify", post(handler::verify_otp))
        .route("/google", post(handler::google_sign_in))
        .route("/google/register", post(handler::google_register))
        .route("/me", get(handler::me))
}
