//! Image Upload Handler
//!
//! Images are stored on the image host under a content-addressed name, so
//! uploading the same bytes twice replaces the file with itself.

use axum::{
    Json,
    extract::{Multipart, State},
};
use shared::models::UploadedImage;

use crate::api::multipart::{FormData, UploadedFile};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::ImageHost;
use crate::utils::image::{hashed_path, validate_image};
use crate::utils::{ApiResponse, AppError, AppResult, ok};

const UPLOAD_DIR: &str = "uploads";
const FILE_FIELD: &str = "image";

/// Validate and push one image to the host under `dir`
pub(crate) async fn store_image(
    host: &dyn ImageHost,
    dir: &str,
    file: UploadedFile,
) -> AppResult<UploadedImage> {
    let ext = validate_image(&file.data, &file.file_name)?;
    let path = hashed_path(dir, &file.data, &ext);
    let size = file.data.len();

    let url = host.put(&path, file.data.to_vec()).await?;

    tracing::info!(
        original_name = %file.file_name,
        path = %path,
        size,
        "Image stored"
    );
    Ok(UploadedImage { url, path })
}

pub async fn upload(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedImage>>> {
    let mut form = FormData::read(multipart).await?;
    let file = form.take_file(FILE_FIELD).ok_or_else(|| {
        AppError::validation(format!("No '{FILE_FIELD}' file field found"))
            .with_detail("field", FILE_FIELD)
    })?;

    let stored = store_image(state.image_host.as_ref(), UPLOAD_DIR, file).await?;
    tracing::debug!(user = %current_user.id, url = %stored.url, "Upload finished");
    Ok(ok(stored))
}
