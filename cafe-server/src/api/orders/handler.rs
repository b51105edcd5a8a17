//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{OrderCreate, OrderDeleted, OrderUpdate, OrderUpdated, OrderView};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ValidJson, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: Option<String>,
}

pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidJson(draft): ValidJson<OrderCreate>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    let view = state.order_service().create(&current_user, draft).await?;
    Ok(ok_with_message(view, "Order created"))
}

pub async fn list(
    State(state): State<ServerState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<OrderView>>>> {
    let orders = state.order_service().list().await?;
    Ok(ok(orders))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    _current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    Ok(ok(state.order_service().get(&id).await?))
}

/// `GET /api/order/by-id?id=...`
pub async fn get_by_query(
    State(state): State<ServerState>,
    _current_user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    let id = crate::api::non_blank(query.id)
        .ok_or_else(|| AppError::validation("Query parameter 'id' is required"))?;
    Ok(ok(state.order_service().get(&id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    ValidJson(update): ValidJson<OrderUpdate>,
) -> AppResult<Json<ApiResponse<OrderUpdated>>> {
    let updated = state
        .order_service()
        .update(&current_user, &id, update)
        .await?;
    Ok(ok_with_message(updated, "Order updated"))
}

/// Unconditional delete, whatever the status
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderDeleted>>> {
    let deleted = state.order_service().delete(&current_user, &id).await?;
    Ok(ok_with_message(deleted, "Order deleted"))
}
