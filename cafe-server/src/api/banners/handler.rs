//! Banner API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{BannerCreate, BannerUpdate, BannerView};

use crate::api::non_blank;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Banner;
use crate::db::parse_id;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ValidJson, ok, ok_with_message};

fn banner_not_found() -> AppError {
    AppError::new(ErrorCode::BannerNotFound)
}

fn required(value: String, field: &str) -> AppResult<String> {
    non_blank(Some(value)).ok_or_else(|| {
        AppError::validation(format!("Field '{field}' is required")).with_detail("field", field)
    })
}

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<BannerView>>>> {
    let banners = state.banner_repo().find_all().await?;
    if banners.is_empty() {
        return Err(AppError::with_message(ErrorCode::BannerNotFound, "No banners found"));
    }
    Ok(ok(banners.into_iter().map(BannerView::from).collect()))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BannerView>>> {
    let id = parse_id(&id, "banner")?;
    let banner = state
        .banner_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(banner_not_found)?;
    Ok(ok(banner.into()))
}

pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidJson(req): ValidJson<BannerCreate>,
) -> AppResult<Json<ApiResponse<BannerView>>> {
    let banner = state
        .banner_repo()
        .create(Banner {
            uid: String::new(),
            name: required(req.name, "name")?,
            photo: required(req.photo, "photo")?,
        })
        .await?;

    tracing::info!(banner_id = %banner.uid, created_by = %current_user.id, "Banner created");
    Ok(ok_with_message(banner.into(), "Banner created"))
}

#[derive(Debug, Default, Serialize)]
struct BannerMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
}

/// Empty patch is 400; a patch equal to the stored record is 304
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<BannerUpdate>,
) -> AppResult<Json<ApiResponse<BannerView>>> {
    let id = parse_id(&id, "banner")?;
    let name = non_blank(req.name);
    let photo = non_blank(req.photo);
    if name.is_none() && photo.is_none() {
        return Err(AppError::validation("Nothing to update: expected name or photo"));
    }

    let current = state
        .banner_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(banner_not_found)?;

    let merge = BannerMerge {
        name: name.filter(|n| *n != current.name),
        photo: photo.filter(|p| *p != current.photo),
    };
    if merge.name.is_none() && merge.photo.is_none() {
        return Err(AppError::not_modified());
    }

    let banner = state
        .banner_repo()
        .merge(&id, merge)
        .await?
        .ok_or_else(banner_not_found)?;

    tracing::info!(banner_id = %id, updated_by = %current_user.id, "Banner updated");
    Ok(ok_with_message(banner.into(), "Banner updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BannerView>>> {
    let id = parse_id(&id, "banner")?;
    let banner = state
        .banner_repo()
        .delete(&id)
        .await?
        .ok_or_else(banner_not_found)?;

    tracing::info!(banner_id = %id, deleted_by = %current_user.id, "Banner deleted");
    Ok(ok_with_message(banner.into(), "Banner deleted"))
}
