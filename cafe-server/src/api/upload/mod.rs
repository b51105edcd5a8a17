//! Image upload API
//!
//! | path | method | auth |
//! |------|--------|------|
//! | /api/image/upload | POST (multipart, field `image`) | bearer |

mod handler;

pub(crate) use handler::store_image;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;
use crate::utils::image::MAX_IMAGE_SIZE;

/// Room for the multipart envelope around the largest accepted image
pub(crate) const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_SIZE + 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/image/upload", post(handler::upload))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
