//! Authentication handlers

use axum::{Json, extract::State};
use shared::models::{
    GoogleSignInRequest, LoginRequest, LoginResponse, OtpIssued, OtpRequest, OtpResendRequest, OtpVerifyRequest,
    RegisterRequest, Role, UserProfile,
};

use crate::auth::CurrentUser;
use crate::auth::password::{ONE_TIME_PASSWORD_LEN, generate_password, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{OneTimePassword, User};
use crate::security_log;
use crate::services::SendError;
use crate::utils::phone::{is_valid_phone_number, normalize_phone_number};
use crate::utils::time::now_millis;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ValidJson, ok, ok_with_message};

fn required<'a>(value: &'a str, field: &str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("Field '{field}' is required"),
        )
        .with_detail("field", field));
    }
    Ok(value)
}

fn valid_phone(raw: &str) -> AppResult<String> {
    let phone = normalize_phone_number(required(raw, "phone_number")?);
    if !is_valid_phone_number(&phone) {
        return Err(AppError::invalid_format("Invalid phone number format")
            .with_detail("phone_number", phone));
    }
    Ok(phone)
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

fn issue_token(state: &ServerState, user: User) -> AppResult<LoginResponse> {
    let token = state
        .jwt_service
        .generate_token(&user.phone_number, &user.name, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    Ok(LoginResponse {
        token,
        expires_in: state.jwt_service.expires_in(),
        user: user.into(),
    })
}

/// Create a `user` account
pub async fn register(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let name = required(&req.name, "name")?.to_string();
    let email = required(&req.email, "email")?.to_ascii_lowercase();
    let password = required(&req.password, "password")?;
    let phone_number = valid_phone(&req.phone_number)?;

    if !email.contains('@') {
        return Err(AppError::invalid_format("Invalid email address").with_detail("email", email));
    }

    let user = User::new(name, phone_number, email, hash(password)?, Role::User, now_millis());
    let user = state.user_repo().create(user).await?;

    tracing::info!(user_id = %user.uid, phone_number = %user.phone_number, "User registered");
    Ok(ok_with_message(user.into(), "Registration successful"))
}

/// Email and password login
pub async fn login(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let email = required(&req.email, "email")?.to_ascii_lowercase();
    let password = required(&req.password, "password")?;

    let user = state.user_repo().find_by_email(&email).await?;
    let user = match user {
        Some(user) if user.has_password() && verify_password(password, &user.password_hash) => user,
        Some(_) => {
            security_log!("WARN", "login_failed", email = email.clone(), reason = "invalid_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", email = email.clone(), reason = "unknown_email");
            return Err(AppError::invalid_credentials());
        }
    };

    tracing::info!(user_id = %user.uid, "User logged in");
    Ok(ok(issue_token(&state, user)?))
}

/// Generate, store and deliver a one-time password for a registered phone
async fn issue_one_time_password(state: &ServerState, phone_number: &str) -> AppResult<OtpIssued> {
    if state.user_repo().find_by_phone(phone_number).await?.is_none() {
        security_log!("WARN", "otp_unknown_phone", phone_number = phone_number.to_string());
        return Err(AppError::with_message(
            ErrorCode::InvalidCredentials,
            "Phone number not registered",
        ));
    }

    let password = generate_password(ONE_TIME_PASSWORD_LEN);
    state
        .otp_repo()
        .save(OneTimePassword {
            uid: String::new(),
            phone_number: phone_number.to_string(),
            password_hash: hash(&password)?,
            created_at: now_millis(),
        })
        .await?;

    state
        .password_sender
        .send(phone_number, &password)
        .await
        .map_err(|e| {
            tracing::error!(phone_number, error = %e, "Failed to deliver one-time password");
            match e {
                SendError::NotConfigured => {
                    AppError::with_message(ErrorCode::ServiceUnavailable, e.to_string())
                }
                _ => AppError::upstream(e.to_string()),
            }
        })?;

    tracing::info!(phone_number, "One-time password issued");
    Ok(OtpIssued {
        phone_number: phone_number.to_string(),
    })
}

pub async fn request_otp(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<OtpRequest>,
) -> AppResult<Json<ApiResponse<OtpIssued>>> {
    state.captcha.verify(&req.captcha).await.map_err(|e| {
        security_log!("WARN", "captcha_failed", error = e.to_string());
        AppError::from(e)
    })?;

    let phone_number = valid_phone(&req.phone_number)?;
    let issued = issue_one_time_password(&state, &phone_number).await?;
    Ok(ok_with_message(issued, "One-time password sent"))
}

/// Issue a fresh password for a phone that already has one pending
pub async fn resend_otp(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<OtpResendRequest>,
) -> AppResult<Json<ApiResponse<OtpIssued>>> {
    let phone_number = valid_phone(&req.phone_number)?;

    if state.otp_repo().find(&phone_number).await?.is_none() {
        return Err(AppError::not_found("one-time password"));
    }

    let issued = issue_one_time_password(&state, &phone_number).await?;
    Ok(ok_with_message(issued, "One-time password sent"))
}

/// Exchange a one-time password for a token
pub async fn verify_otp(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<OtpVerifyRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let phone_number = normalize_phone_number(required(&req.phone_number, "phone_number")?);
    let password = required(&req.password, "password")?;

    if !state.otp_limiter.check(&phone_number) {
        security_log!("WARN", "otp_rate_limited", phone_number = phone_number.clone());
        return Err(AppError::rate_limited());
    }

    let otp = state
        .otp_repo()
        .find(&phone_number)
        .await?
        .ok_or_else(|| AppError::not_found("one-time password"))?;

    let ttl_millis = state.config.otp.ttl.as_millis() as i64;
    if otp.is_expired(now_millis(), ttl_millis) {
        security_log!("WARN", "otp_expired", phone_number = phone_number.clone());
        return Err(AppError::new(ErrorCode::OneTimePasswordExpired));
    }

    if !verify_password(password, &otp.password_hash) {
        security_log!("WARN", "otp_invalid", phone_number = phone_number.clone());
        return Err(AppError::invalid_credentials());
    }

    state.otp_repo().consume(&phone_number).await?;

    let user = state
        .user_repo()
        .find_by_phone(&phone_number)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    tracing::info!(user_id = %user.uid, "User logged in with one-time password");
    Ok(ok(issue_token(&state, user)?))
}

/// Sign in with a Google ID token
///
/// Only accounts that already carry a phone number qualify; the client is
/// expected to send the user through the QR flow otherwise.
pub async fn google_sign_in(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<GoogleSignInRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let identity = state.google.verify(&req.token).await.map_err(|e| {
        security_log!("WARN", "google_token_rejected", error = e.to_string());
        AppError::from(e)
    })?;
    let email = identity.email.trim().to_ascii_lowercase();

    let user = match state.user_repo().find_by_email(&email).await? {
        Some(user) if !user.phone_number.is_empty() => user,
        _ => {
            security_log!("WARN", "google_sign_in_without_phone", email = email.clone());
            return Err(AppError::new(ErrorCode::PhoneNumberRequired).with_detail("email", email));
        }
    };

    tracing::info!(user_id = %user.uid, "User signed in with Google");
    Ok(ok_with_message(issue_token(&state, user)?, "Authenticated successfully"))
}

/// Link a Google account to the caller's phone number
///
/// Creates the user on first contact; afterwards only the email and the
/// profile picture are refreshed.
pub async fn google_register(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidJson(req): ValidJson<GoogleSignInRequest>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let identity = state.google.verify(&req.token).await.map_err(|e| {
        security_log!("WARN", "google_token_rejected", error = e.to_string());
        AppError::from(e)
    })?;
    let email = identity.email.trim().to_ascii_lowercase();
    let now = now_millis();
    let users = state.user_repo();

    if let Some(user) = users.find_by_phone(&current_user.id).await? {
        let user = users
            .link_google(&user.uid, &email, &identity.picture, now)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
        tracing::info!(user_id = %user.uid, "Google account linked");
        return Ok(ok_with_message(user.into(), "Authenticated successfully"));
    }

    let name = if identity.name.trim().is_empty() {
        current_user.alias.clone()
    } else {
        identity.name.trim().to_string()
    };
    let mut user = User::new(name, current_user.id.clone(), email, String::new(), Role::User, now);
    user.google_profile_picture = identity.picture;
    let user = users.create(user).await?;

    tracing::info!(user_id = %user.uid, phone_number = %user.phone_number, "User registered with Google");
    Ok(ok_with_message(user.into(), "User registered"))
}

/// Stored profile of the token's subject
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let user = state
        .user_repo()
        .find_by_phone(&current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(ok(user.into()))
}
