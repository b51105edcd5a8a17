//! Role-gated dashboard probes
//!
//! Each route answers with the caller's profile once the role gate lets
//! the request through.
//!
//! | path | roles |
//! |------|-------|
//! | /api/dashboard/menu | user, dosen |
//! | /api/dashboard/admin | admin |
//! | /api/dashboard/cashier | cashier |

use axum::{Extension, Json, Router, middleware, routing::get};
use shared::models::{Role, UserProfile};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::User;
use crate::utils::{ApiResponse, ok};

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/dashboard", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let menu = Router::new().route("/menu", get(profile)).layer(
        middleware::from_fn_with_state(state.clone(), require_role(&[Role::User, Role::Dosen])),
    );
    let admin = Router::new()
        .route("/admin", get(profile))
        .layer(middleware::from_fn_with_state(state.clone(), require_role(&[Role::Admin])));
    let cashier = Router::new()
        .route("/cashier", get(profile))
        .layer(middleware::from_fn_with_state(state.clone(), require_role(&[Role::Cashier])));

    menu.merge(admin).merge(cashier)
}

async fn profile(Extension(user): Extension<User>) -> Json<ApiResponse<UserProfile>> {
    ok(UserProfile::from(user))
}
