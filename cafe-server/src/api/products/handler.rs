//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{ProductCreate, ProductUpdate, ProductView};

use crate::api::non_blank;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Product;
use crate::db::parse_id;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ValidJson, ok, ok_with_message};

fn product_not_found() -> AppError {
    AppError::new(ErrorCode::ProductNotFound)
}

fn valid_price(price: f64) -> AppResult<f64> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(AppError::invalid_format("Invalid price").with_detail("field", "price"))
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<ProductView>>>> {
    let products = state.product_repo().find_all().await?;
    if products.is_empty() {
        return Err(AppError::with_message(ErrorCode::ProductNotFound, "No products found"));
    }
    Ok(ok(products.into_iter().map(ProductView::from).collect()))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProductView>>> {
    let id = parse_id(&id, "product")?;
    let product = state
        .product_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(product_not_found)?;
    Ok(ok(product.into()))
}

pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidJson(req): ValidJson<ProductCreate>,
) -> AppResult<Json<ApiResponse<ProductView>>> {
    let name = non_blank(Some(req.name))
        .ok_or_else(|| AppError::validation("Product name is required").with_detail("field", "name"))?;

    let product = state
        .product_repo()
        .create(Product {
            uid: String::new(),
            name,
            description: req.description.trim().to_string(),
            price: valid_price(req.price)?,
            available: req.available,
            photo: req.photo.trim().to_string(),
        })
        .await?;

    tracing::info!(product_id = %product.uid, created_by = %current_user.id, "Product created");
    Ok(ok_with_message(product.into(), "Product created"))
}

#[derive(Debug, Default, Serialize)]
struct ProductMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
}

impl ProductMerge {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.available.is_none()
            && self.photo.is_none()
    }
}

/// Empty patch is 400; a patch equal to the stored record is 304
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<ProductUpdate>,
) -> AppResult<Json<ApiResponse<ProductView>>> {
    let id = parse_id(&id, "product")?;
    let requested = ProductMerge {
        name: non_blank(req.name),
        description: non_blank(req.description),
        price: req.price.map(valid_price).transpose()?,
        available: req.available,
        photo: non_blank(req.photo),
    };
    if requested.is_empty() {
        return Err(AppError::validation("Nothing to update"));
    }

    let current = state
        .product_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(product_not_found)?;

    let merge = ProductMerge {
        name: requested.name.filter(|v| *v != current.name),
        description: requested.description.filter(|v| *v != current.description),
        price: requested.price.filter(|v| *v != current.price),
        available: requested.available.filter(|v| *v != current.available),
        photo: requested.photo.filter(|v| *v != current.photo),
    };
    if merge.is_empty() {
        return Err(AppError::not_modified());
    }

    let product = state
        .product_repo()
        .merge(&id, merge)
        .await?
        .ok_or_else(product_not_found)?;

    tracing::info!(product_id = %id, updated_by = %current_user.id, "Product updated");
    Ok(ok_with_message(product.into(), "Product updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProductView>>> {
    let id = parse_id(&id, "product")?;
    let product = state
        .product_repo()
        .delete(&id)
        .await?
        .ok_or_else(product_not_found)?;

    tracing::info!(product_id = %id, deleted_by = %current_user.id, "Product deleted");
    Ok(ok_with_message(product.into(), "Product deleted"))
}
