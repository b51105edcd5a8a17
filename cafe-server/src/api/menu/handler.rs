//! Menu API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;
use serde_json::Value;
use shared::models::{MenuStatus, MenuUpdate, MenuView};

use crate::api::multipart::FormData;
use crate::api::non_blank;
use crate::api::upload::store_image;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::MenuItem;
use crate::db::parse_id;
use crate::utils::money::parse_price;
use crate::utils::time::now_millis;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ValidJson, ok, ok_with_message};

const IMAGE_DIR: &str = "menuImages";
const IMAGE_FIELD: &str = "menuImage";

fn menu_not_found() -> AppError {
    AppError::new(ErrorCode::MenuNotFound)
}

fn price_from_text(raw: &str) -> AppResult<f64> {
    parse_price(raw).ok_or_else(|| {
        AppError::invalid_format(format!("Invalid price: {raw}")).with_detail("field", "price")
    })
}

fn status_from_text(raw: &str) -> AppResult<MenuStatus> {
    MenuStatus::parse(raw).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::MenuInvalidStatus,
            format!("Invalid menu status '{raw}', expected 'Tersedia' or 'Tidak Tersedia'"),
        )
    })
}

/// A number, or text such as `Rp 18.000`
fn price_from_json(value: &Value) -> AppResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .map(Some)
            .ok_or_else(|| AppError::invalid_format("Invalid price").with_detail("field", "price")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => price_from_text(s).map(Some),
        _ => Err(AppError::invalid_format("Invalid price").with_detail("field", "price")),
    }
}

/// Validated category reference
async fn existing_category(state: &ServerState, raw: &str) -> AppResult<String> {
    let id = parse_id(raw, "category")?;
    state
        .category_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound).with_detail("category_id", raw))?;
    Ok(id)
}

/// Every menu item; an empty menu is reported as not found
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<MenuView>>>> {
    let items = state.menu_repo().find_all().await?;
    if items.is_empty() {
        return Err(AppError::with_message(ErrorCode::MenuNotFound, "No menu items found"));
    }
    Ok(ok(items.into_iter().map(MenuView::from).collect()))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MenuView>>> {
    let id = parse_id(&id, "menu")?;
    let item = state
        .menu_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(menu_not_found)?;
    Ok(ok(item.into()))
}

/// Multipart create; the image is optional
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<MenuView>>> {
    let mut form = FormData::read(multipart).await?;

    let name = form.required("name")?.to_string();
    let price = price_from_text(form.required("price")?)?;
    let status = match form.text("status") {
        Some(raw) => status_from_text(raw)?,
        None => MenuStatus::Tersedia,
    };
    let description = form.text("description").unwrap_or_default().to_string();
    let category_raw = form.required("category_id")?.to_string();
    let category_id = existing_category(&state, &category_raw).await?;

    let image = match form.take_file(IMAGE_FIELD) {
        Some(file) => store_image(state.image_host.as_ref(), IMAGE_DIR, file).await?.url,
        None => String::new(),
    };

    let now = now_millis();
    let item = state
        .menu_repo()
        .create(MenuItem {
            uid: String::new(),
            category_id,
            name,
            description,
            image,
            price,
            status,
            created_at: now,
            updated_at: now,
        })
        .await?;

    tracing::info!(menu_id = %item.uid, name = %item.name, created_by = %current_user.id, "Menu item created");
    Ok(ok_with_message(item.into(), "Menu item created"))
}

#[derive(Debug, Default, Serialize)]
struct MenuMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<MenuStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<i64>,
}

impl MenuMerge {
    fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.price.is_none()
            && self.status.is_none()
    }
}

/// Keep `new` only when it differs from `current`
fn changed<T: PartialEq>(new: Option<T>, current: &T) -> Option<T> {
    new.filter(|v| v != current)
}

/// JSON patch; blank values are ignored and a patch that changes nothing is 304
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<MenuUpdate>,
) -> AppResult<Json<ApiResponse<MenuView>>> {
    let id = parse_id(&id, "menu")?;
    let current = state
        .menu_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(menu_not_found)?;

    let mut merge = MenuMerge {
        name: changed(non_blank(req.name), &current.name),
        description: changed(non_blank(req.description), &current.description),
        image: changed(non_blank(req.image), &current.image),
        ..Default::default()
    };

    if let Some(raw) = non_blank(req.category_id) {
        let category_id = existing_category(&state, &raw).await?;
        merge.category_id = changed(Some(category_id), &current.category_id);
    }
    if let Some(value) = req.price.as_ref() {
        merge.price = changed(price_from_json(value)?, &current.price);
    }
    if let Some(raw) = non_blank(req.status) {
        merge.status = changed(Some(status_from_text(&raw)?), &current.status);
    }

    if merge.is_empty() {
        return Err(AppError::not_modified());
    }
    merge.updated_at = Some(now_millis());

    let item = state
        .menu_repo()
        .merge(&id, merge)
        .await?
        .ok_or_else(menu_not_found)?;

    tracing::info!(menu_id = %id, updated_by = %current_user.id, "Menu item updated");
    Ok(ok_with_message(item.into(), "Menu item updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MenuView>>> {
    let id = parse_id(&id, "menu")?;
    let item = state
        .menu_repo()
        .delete(&id)
        .await?
        .ok_or_else(menu_not_found)?;

    tracing::info!(menu_id = %id, deleted_by = %current_user.id, "Menu item deleted");
    Ok(ok_with_message(item.into(), "Menu item deleted"))
}

#[derive(Serialize)]
struct ImageMerge {
    image: String,
    updated_at: i64,
}

/// Replace the image of an existing menu item
pub async fn replace_image(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<MenuView>>> {
    let id = parse_id(&id, "menu")?;
    state
        .menu_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(menu_not_found)?;

    let mut form = FormData::read(multipart).await?;
    let file = form.take_file(IMAGE_FIELD).ok_or_else(|| {
        AppError::validation(format!("No '{IMAGE_FIELD}' file field found"))
            .with_detail("field", IMAGE_FIELD)
    })?;
    let stored = store_image(state.image_host.as_ref(), IMAGE_DIR, file).await?;

    let item = state
        .menu_repo()
        .merge(
            &id,
            ImageMerge {
                image: stored.url,
                updated_at: now_millis(),
            },
        )
        .await?
        .ok_or_else(menu_not_found)?;

    tracing::info!(menu_id = %id, updated_by = %current_user.id, "Menu image replaced");
    Ok(ok_with_message(item.into(), "Menu image updated"))
}
