//! Menu API
//!
//! | path | method | auth |
//! |------|--------|------|
//! | /api/menu | GET | none |
//! | /api/menu | POST (multipart) | bearer |
//! | /api/menu/{id} | GET | none |
//! | /api/menu/{id} | PUT, DELETE | bearer |
//! | /api/menu/{id}/image | POST (multipart, field `menuImage`) | bearer |

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::api::upload::UPLOAD_BODY_LIMIT;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/image", post(handler::replace_image))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
