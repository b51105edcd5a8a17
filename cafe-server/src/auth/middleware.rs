//! Role gate middleware

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use shared::models::Role;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

type GateFuture = Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>;

/// Only let callers whose stored role is in `allowed` through
///
/// The role is read from the user record, not from the token, so a role
/// change takes effect without reissuing tokens. The stored
/// [`User`](crate::db::models::User) is put into the request extensions.
///
/// ```ignore
/// Router::new()
///     .route("/admin", get(handler))
///     .layer(middleware::from_fn_with_state(state, require_role(&[Role::Admin])));
/// ```
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(State<ServerState>, Request, Next) -> GateFuture + Clone {
    move |State(state): State<ServerState>, req: Request, next: Next| {
        Box::pin(async move {
            let (mut parts, body) = req.into_parts();
            let caller = CurrentUser::from_request_parts(&mut parts, &state).await?;

            let user = state
                .user_repo()
                .find_by_phone(&caller.id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

            if !allowed.contains(&user.role) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = caller.id.clone(),
                    role = user.role.as_str(),
                    required = format!("{allowed:?}")
                );
                return Err(AppError::with_message(
                    ErrorCode::RoleRequired,
                    format!("This resource is not available to role '{}'", user.role),
                ));
            }

            parts.extensions.insert(user);
            Ok(next.run(Request::from_parts(parts, body)).await)
        }) as GateFuture
    }
}
