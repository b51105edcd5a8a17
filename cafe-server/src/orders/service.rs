//! Order operations
//!
//! Each operation resolves the caller, touches storage once or twice and
//! returns an API projection.

use chrono_tz::Tz;
use shared::models::{
    OrderCreate, OrderDeleted, OrderStatus, OrderUpdate, OrderUpdated, OrderView,
};

use super::builder::build_order;
use super::patch::OrderPatch;
use super::projection::{order_updated, order_view};
use super::status::check_transition;
use crate::auth::CurrentUser;
use crate::db::models::{Order, User};
use crate::db::parse_id;
use crate::db::repository::{OrderRepository, UserRepository};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    users: UserRepository,
    tz: Tz,
}

impl OrderService {
    pub fn new(orders: OrderRepository, users: UserRepository, tz: Tz) -> Self {
        Self { orders, users, tz }
    }

    /// Submit a new order on behalf of the caller
    pub async fn create(&self, caller: &CurrentUser, draft: OrderCreate) -> AppResult<OrderView> {
        let creator = self.resolve_caller(caller).await?;
        let order = build_order(draft, &creator, now_millis())?;
        let order = self.orders.create(order).await?;

        tracing::info!(
            order_id = %order.uid,
            order_number = %order.order_number,
            created_by = %order.created_by,
            total = order.total,
            "Order created"
        );
        Ok(order_view(order, self.tz))
    }

    /// Every stored order; an empty collection is reported as not found
    pub async fn list(&self) -> AppResult<Vec<OrderView>> {
        let orders = self.orders.find_all().await?;
        if orders.is_empty() {
            return Err(AppError::with_message(ErrorCode::OrderNotFound, "No orders found"));
        }
        Ok(orders.into_iter().map(|o| order_view(o, self.tz)).collect())
    }

    pub async fn get(&self, raw_id: &str) -> AppResult<OrderView> {
        let id = parse_id(raw_id, "order")?;
        let order = self.load(&id).await?;
        Ok(order_view(order, self.tz))
    }

    /// Apply a status change and/or field updates
    ///
    /// A status change is written only if the stored status is still the one
    /// the transition was checked against.
    pub async fn update(
        &self,
        caller: &CurrentUser,
        raw_id: &str,
        update: OrderUpdate,
    ) -> AppResult<OrderUpdated> {
        let patch = OrderPatch::from_request(update)?;
        let id = parse_id(raw_id, "order")?;
        let updater = self.resolve_caller(caller).await?;
        let current = self.load(&id).await?;

        let updated = match patch.status {
            Some(requested) => {
                check_transition(current.status, requested)?;
                let merge = patch.into_merge(Some((updater.name.as_str(), updater.role, now_millis())));
                match self
                    .orders
                    .merge_if_status(&id, current.status, merge)
                    .await?
                {
                    Some(order) => order,
                    None => return Err(self.lost_race(&id, current.status).await),
                }
            }
            None => self
                .orders
                .merge(&id, patch.into_merge(None))
                .await?
                .ok_or_else(order_not_found)?,
        };

        tracing::info!(
            order_id = %id,
            from = %current.status,
            to = %updated.status,
            updated_by = %updater.name,
            "Order updated"
        );
        Ok(order_updated(updated, self.tz))
    }

    /// Remove an order regardless of its status
    pub async fn delete(&self, caller: &CurrentUser, raw_id: &str) -> AppResult<OrderDeleted> {
        let id = parse_id(raw_id, "order")?;
        self.orders.delete(&id).await?.ok_or_else(order_not_found)?;

        tracing::warn!(order_id = %id, deleted_by = %caller.alias, "Order deleted");
        Ok(OrderDeleted {
            id,
            deleted_by: caller.alias.clone(),
        })
    }

    async fn resolve_caller(&self, caller: &CurrentUser) -> AppResult<User> {
        self.users
            .find_by_phone(&caller.id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("user", caller.id.as_str()))
    }

    async fn load(&self, id: &str) -> AppResult<Order> {
        self.orders.find_by_id(id).await?.ok_or_else(order_not_found)
    }

    /// The conditional write matched nothing: report what the order is now
    async fn lost_race(&self, id: &str, observed: OrderStatus) -> AppError {
        match self.orders.find_by_id(id).await {
            Ok(Some(fresh)) => {
                tracing::warn!(order_id = %id, observed = %observed, current = %fresh.status, "Concurrent status update");
                AppError::with_message(
                    ErrorCode::InvalidStatusTransition,
                    format!("Order status changed to {} during the update", fresh.status),
                )
                .with_detail("current_status", fresh.status.as_str())
            }
            Ok(None) => order_not_found(),
            Err(e) => e.into(),
        }
    }
}

fn order_not_found() -> AppError {
    AppError::new(ErrorCode::OrderNotFound)
}
