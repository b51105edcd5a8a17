//! Order API
//!
//! Every route needs a bearer token.
//!
//! | path | method |
//! |------|--------|
//! | /api/order | POST, GET |
//! | /api/order/by-id?id= | GET |
//! | /api/order/{id} | GET, PUT, DELETE |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/order", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/by-id", get(handler::get_by_query))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
