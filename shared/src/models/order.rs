//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
///
/// `terkirim` is the initial state. `selesai` and `dibatalkan` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted by the customer
    Terkirim,
    /// Being prepared
    Diproses,
    /// Completed
    Selesai,
    /// Cancelled
    Dibatalkan,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Terkirim => "terkirim",
            Self::Diproses => "diproses",
            Self::Selesai => "selesai",
            Self::Dibatalkan => "dibatalkan",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Selesai | Self::Dibatalkan)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name an order status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrderStatus(pub String);

impl fmt::Display for UnknownOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownOrderStatus {}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terkirim" => Ok(Self::Terkirim),
            "diproses" => Ok(Self::Diproses),
            "selesai" => Ok(Self::Selesai),
            "dibatalkan" => Ok(Self::Dibatalkan),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Customer contact snapshot embedded in an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One line of an order
///
/// `price` and `menu_name` are captured at submit time when the client sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_id: String,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_name: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub queue_number: i64,
    pub user_info: UserInfo,
    #[serde(rename = "orders", default)]
    pub items: Vec<OrderItem>,
    pub total: f64,
    #[serde(default)]
    pub payment_method: String,
}

/// Update order payload
///
/// `status` stays a raw string so an unknown value is reported as an invalid
/// status instead of a decode failure. `queue_number` is accepted only to be
/// rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    #[serde(rename = "orders", default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_number: Option<serde_json::Value>,
}

/// API projection of a stored order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: String,
    pub order_number: String,
    pub queue_number: i64,
    /// Localized creation time, `dd-mm-yyyy HH:MM:SS`
    pub order_date: String,
    pub user_id: String,
    pub user_info: UserInfo,
    #[serde(rename = "orders")]
    pub items: Vec<OrderItem>,
    /// Currency string, e.g. `Rp 50000.00`
    pub total: String,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_by: String,
    pub created_by_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Response of a successful update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdated {
    pub id: String,
    pub status: OrderStatus,
    pub user_info: UserInfo,
    #[serde(rename = "orders")]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_role: Option<String>,
    /// Long form, e.g. `17 Oktober 2026, 15:04 WIB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Response of a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDeleted {
    pub id: String,
    pub deleted_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Dibatalkan).unwrap(),
            "\"dibatalkan\""
        );
        assert_eq!("diproses".parse::<OrderStatus>(), Ok(OrderStatus::Diproses));
        assert!("Diproses".parse::<OrderStatus>().is_err());
        assert!(OrderStatus::Selesai.is_terminal());
        assert!(!OrderStatus::Diproses.is_terminal());
    }

    #[test]
    fn test_create_payload_uses_orders_key() {
        let json = r#"{
            "order_number": "A-001",
            "queue_number": 7,
            "user_info": {"name": "Budi", "whatsapp": "6281234567890"},
            "orders": [{"menu_id": "M1", "quantity": 2}],
            "total": 50000,
            "payment_method": "Cash"
        }"#;
        let draft: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].quantity, 2);
        assert_eq!(draft.user_info.note, None);
        assert_eq!(draft.total, 50000.0);
    }

    #[test]
    fn test_update_payload_detects_queue_number() {
        let patch: OrderUpdate = serde_json::from_str(r#"{"queue_number": 3}"#).unwrap();
        assert!(patch.queue_number.is_some());
        assert!(patch.status.is_none());

        let patch: OrderUpdate = serde_json::from_str(r#"{"status": "bogus"}"#).unwrap();
        assert_eq!(patch.status.as_deref(), Some("bogus"));
    }

    #[test]
    fn test_items_must_be_objects() {
        let result = serde_json::from_str::<OrderUpdate>(r#"{"orders": ["M1"]}"#);
        assert!(result.is_err());
    }
}
