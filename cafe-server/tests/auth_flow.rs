//! Registration, login, one-time password and role gate
//! Run: cargo test -p cafe-server --test auth_flow

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{TestApp, get_request, json_request};
use http::StatusCode;
use parking_lot::Mutex;
use serde_json::json;
use shared::models::Role;

use cafe_server::services::{
    CaptchaError, CaptchaVerifier, GoogleIdentity, GoogleTokenError, GoogleTokenVerifier,
    PasswordSender, SendError,
};

/// Accepts the literal response "pass"
struct StubCaptcha;

#[async_trait]
impl CaptchaVerifier for StubCaptcha {
    async fn verify(&self, response: &str) -> Result<(), CaptchaError> {
        if response == "pass" {
            Ok(())
        } else {
            Err(CaptchaError::Rejected)
        }
    }
}

/// Accepts the literal token "google-ok" as Sari's account
struct StubGoogle;

#[async_trait]
impl GoogleTokenVerifier for StubGoogle {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, GoogleTokenError> {
        if id_token == "google-ok" {
            Ok(GoogleIdentity {
                email: "Sari@Gmail.com".into(),
                name: "Sari".into(),
                picture: "https://lh3.googleusercontent.com/a/sari".into(),
            })
        } else {
            Err(GoogleTokenError::Rejected("signature".into()))
        }
    }
}

/// Records the last delivered password instead of sending it
#[derive(Default)]
struct CapturingSender {
    last: Mutex<Option<(String, String)>>,
}

#[async_trait]
impl PasswordSender for CapturingSender {
    async fn send(&self, phone_number: &str, password: &str) -> Result<(), SendError> {
        *self.last.lock() = Some((phone_number.to_string(), password.to_string()));
        Ok(())
    }
}

impl CapturingSender {
    fn password(&self) -> String {
        self.last.lock().as_ref().map(|(_, p)| p.clone()).unwrap()
    }
}

async fn app_with_stubs(adjust: impl FnOnce(&mut cafe_server::Config)) -> (TestApp, Arc<CapturingSender>) {
    let sender = Arc::new(CapturingSender::default());
    let captured = sender.clone();
    let app = TestApp::with_config(adjust)
        .await
        .map_state(|state| state.with_captcha(Arc::new(StubCaptcha)).with_password_sender(captured));
    (app, sender)
}

async fn register(app: &TestApp) {
    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "name": "Budi",
                "phone_number": "0812-3456-7890",
                "email": "Budi@Example.com",
                "password": "rahasia123"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;
    register(&app).await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "budi@example.com", "password": "rahasia123"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["user"]["phone_number"], "6281234567890");
    assert_eq!(body["data"]["user"]["role"], "user");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = app.send(get_request("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "budi@example.com");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_missing_fields() {
    let app = TestApp::new().await;
    register(&app).await;

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "name": "Budi Lain",
                "phonenumber": "081234567890",
                "email": "other@example.com",
                "password": "x"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({"name": "Tanpa Email", "phone_number": "081111111111", "password": "x"}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new().await;
    register(&app).await;

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "budi@example.com", "password": "salah"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "nobody@example.com", "password": "salah"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_one_time_password_login() {
    let (app, sender) = app_with_stubs(|_| {}).await;
    register(&app).await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/otp",
            None,
            json!({"phone_number": "081234567890", "captcha": "pass"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["phone_number"], "6281234567890");
    let password = sender.password();
    assert_eq!(password.len(), 12);

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/otp/verify",
            None,
            json!({"phone_number": "6281234567890", "password": password}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["token"].as_str().is_some());

    // single use
    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp/verify",
            None,
            json!({"phone_number": "6281234567890", "password": password}),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_one_time_password_rejections() {
    let (app, sender) = app_with_stubs(|_| {}).await;
    register(&app).await;

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp",
            None,
            json!({"phone_number": "081234567890", "captcha": "robot"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp",
            None,
            json!({"phone_number": "089999999999", "captcha": "pass"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // resend needs a pending password
    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp/resend",
            None,
            json!({"phone_number": "081234567890"}),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp",
            None,
            json!({"phone_number": "081234567890", "captcha": "pass"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let first = sender.password();

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp/resend",
            None,
            json!({"phone_number": "081234567890"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let second = sender.password();

    // the resend replaced the first password
    assert_ne!(first, second);
    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp/verify",
            None,
            json!({"phone_number": "6281234567890", "password": first}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_one_time_password() {
    let (app, sender) = app_with_stubs(|config| config.otp.ttl = std::time::Duration::ZERO).await;
    register(&app).await;

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp",
            None,
            json!({"phone_number": "081234567890", "captcha": "pass"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp/verify",
            None,
            json!({"phone_number": "6281234567890", "password": sender.password()}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verification_is_rate_limited_per_phone() {
    let (app, _) = app_with_stubs(|config| {
        config.otp.rate_per_sec = 0.001;
        config.otp.burst = 2;
    })
    .await;

    let attempt = json!({"phone_number": "6281234567890", "password": "guess"});
    for _ in 0..2 {
        let (status, _) = app
            .send(json_request("POST", "/api/auth/otp/verify", None, attempt.clone()))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (status, _) = app
        .send(json_request("POST", "/api/auth/otp/verify", None, attempt))
        .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    // other phones have their own bucket
    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/otp/verify",
            None,
            json!({"phone_number": "6280000000000", "password": "guess"}),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_role_gates() {
    let app = TestApp::new().await;
    let customer = app.login_as("Budi", "6281234567890", Role::User).await;
    let admin = app.login_as("Admin", "6281111111111", Role::Admin).await;
    let cashier = app.login_as("Sari", "6282222222222", Role::Cashier).await;

    let (status, body) = app
        .send(get_request("/api/dashboard/menu", Some(&customer)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Budi");

    let (status, _) = app
        .send(get_request("/api/dashboard/admin", Some(&customer)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(get_request("/api/dashboard/admin", Some(&admin)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(get_request("/api/dashboard/cashier", Some(&cashier)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(get_request("/api/dashboard/cashier", Some(&admin)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(get_request("/api/dashboard/menu", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_google_sign_in_requires_linked_phone() {
    let app = TestApp::new()
        .await
        .map_state(|state| state.with_google_verifier(Arc::new(StubGoogle)));

    let (status, body) = app
        .send(json_request("POST", "/api/auth/google", None, json!({"token": "google-ok"})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 8003);

    // first contact through the QR flow creates the account
    let bearer = app
        .state
        .jwt_service
        .generate_token("6289876543210", "Sari", Role::User)
        .unwrap();
    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/google/register",
            Some(&bearer),
            json!({"token": "google-ok"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "User registered");
    assert_eq!(body["data"]["phone_number"], "6289876543210");
    assert_eq!(body["data"]["email"], "sari@gmail.com");
    assert_eq!(body["data"]["google_profile_picture"], "https://lh3.googleusercontent.com/a/sari");

    let (status, body) = app
        .send(json_request("POST", "/api/auth/google", None, json!({"token": "google-ok"})))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Authenticated successfully");
    assert_eq!(body["data"]["user"]["phone_number"], "6289876543210");
    assert!(body["data"]["token"].as_str().is_some());
}

#[tokio::test]
async fn test_google_register_links_existing_account() {
    let app = TestApp::new()
        .await
        .map_state(|state| state.with_google_verifier(Arc::new(StubGoogle)));
    let token = app.login_as("Kasir", "6281111111111", Role::Cashier).await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/google/register",
            Some(&token),
            json!({"token": "google-ok"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Authenticated successfully");
    assert_eq!(body["data"]["name"], "Kasir");
    assert_eq!(body["data"]["role"], "cashier");
    assert_eq!(body["data"]["email"], "sari@gmail.com");

    // password login still works, now under the linked email
    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "sari@gmail.com", "password": "secret-password"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_google_rejections() {
    let app = TestApp::new()
        .await
        .map_state(|state| state.with_google_verifier(Arc::new(StubGoogle)));

    let (status, _) = app
        .send(json_request("POST", "/api/auth/google", None, json!({"token": "forged"})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/google/register",
            None,
            json!({"token": "google-ok"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
