//! Order record

use serde::{Deserialize, Serialize};
use shared::models::{OrderItem, OrderStatus, Role, UserInfo};

use super::document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub uid: String,
    pub order_number: String,
    pub queue_number: i64,
    /// Creation instant, epoch milliseconds
    pub order_date: i64,
    /// Identity of the creating user
    pub user_id: String,
    pub user_info: UserInfo,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_by: String,
    pub created_by_role: Role,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_by_role: Option<Role>,
    /// Last status change, epoch milliseconds
    #[serde(default)]
    pub updated_at: Option<i64>,
}

document!(Order, "orders");
