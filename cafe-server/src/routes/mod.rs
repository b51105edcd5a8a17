//! Router assembly
//!
//! [`build_router`] collects every API router; [`build_app`] adds the
//! tower middleware stack and binds the state.

pub mod logging;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, without middleware
///
/// Takes the state because role-gated routers attach their gate with it.
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::dashboard::router(state))
        .merge(api::orders::router())
        .merge(api::menu::router())
        .merge(api::categories::router())
        .merge(api::banners::router())
        .merge(api::products::router())
        .merge(api::upload::router())
}

/// Fully configured application, used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    build_router(&state)
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}
