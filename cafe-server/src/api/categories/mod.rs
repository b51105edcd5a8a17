//! Category API
//!
//! | path | method | auth |
//! |------|--------|------|
//! | /api/category | GET | none |
//! | /api/category | POST | bearer |
//! | /api/category/{id} | GET | none |
//! | /api/category/{id} | PUT, DELETE | bearer |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/category", routes())
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
}
