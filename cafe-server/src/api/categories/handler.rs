//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{CategoryCreate, CategoryUpdate, CategoryView};

use crate::api::non_blank;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Category;
use crate::db::parse_id;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ValidJson, ok, ok_with_message};

fn category_not_found() -> AppError {
    AppError::new(ErrorCode::CategoryNotFound)
}

/// All categories; an empty list is a normal answer here
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryView>>>> {
    let categories = state.category_repo().find_all().await?;
    Ok(ok(categories.into_iter().map(CategoryView::from).collect()))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CategoryView>>> {
    let id = parse_id(&id, "category")?;
    let category = state
        .category_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(category_not_found)?;
    Ok(ok(category.into()))
}

pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidJson(req): ValidJson<CategoryCreate>,
) -> AppResult<Json<ApiResponse<CategoryView>>> {
    let name = non_blank(Some(req.name))
        .ok_or_else(|| AppError::validation("Category name is required").with_detail("field", "name"))?;

    let category = state
        .category_repo()
        .create(Category {
            uid: String::new(),
            name,
        })
        .await?;

    tracing::info!(category_id = %category.uid, name = %category.name, created_by = %current_user.id, "Category created");
    Ok(ok_with_message(category.into(), "Category created"))
}

#[derive(Serialize)]
struct NameMerge {
    name: String,
}

pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<CategoryView>>> {
    let id = parse_id(&id, "category")?;
    let name = non_blank(req.name)
        .ok_or_else(|| AppError::validation("Category name is required").with_detail("field", "name"))?;

    let current = state
        .category_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(category_not_found)?;
    if current.name == name {
        return Err(AppError::not_modified());
    }

    let category = state
        .category_repo()
        .merge(&id, NameMerge { name })
        .await?
        .ok_or_else(category_not_found)?;

    tracing::info!(category_id = %id, updated_by = %current_user.id, "Category updated");
    Ok(ok_with_message(category.into(), "Category updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CategoryView>>> {
    let id = parse_id(&id, "category")?;
    let category = state
        .category_repo()
        .delete(&id)
        .await?
        .ok_or_else(category_not_found)?;

    tracing::info!(category_id = %id, deleted_by = %current_user.id, "Category deleted");
    Ok(ok_with_message(category.into(), "Category deleted"))
}
