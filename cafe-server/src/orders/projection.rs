//! API projections of stored orders

use chrono_tz::Tz;
use shared::models::{OrderUpdated, OrderView};

use crate::db::models::Order;
use crate::utils::money::format_rupiah;
use crate::utils::time::{format_long_date, format_order_date};

/// Full view used by create, list and get
pub fn order_view(order: Order, tz: Tz) -> OrderView {
    OrderView {
        id: order.uid,
        order_number: order.order_number,
        queue_number: order.queue_number,
        order_date: format_order_date(order.order_date, tz),
        user_id: order.user_id,
        user_info: order.user_info,
        items: order.items,
        total: format_rupiah(order.total),
        payment_method: order.payment_method,
        status: order.status,
        created_by: order.created_by,
        created_by_role: order.created_by_role.to_string(),
        updated_by: order.updated_by,
        updated_by_role: order.updated_by_role.map(|r| r.to_string()),
        updated_at: order.updated_at.map(|at| format_order_date(at, tz)),
    }
}

/// Summary returned by an update
pub fn order_updated(order: Order, tz: Tz) -> OrderUpdated {
    OrderUpdated {
        id: order.uid,
        status: order.status,
        user_info: order.user_info,
        items: order.items,
        updated_by: order.updated_by,
        updated_by_role: order.updated_by_role.map(|r| r.to_string()),
        updated_at: order.updated_at.map(|at| format_long_date(at, tz)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{OrderStatus, Role, UserInfo};

    fn stored() -> Order {
        let created = Utc.with_ymd_and_hms(2026, 10, 17, 1, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2026, 10, 17, 8, 4, 5).unwrap();
        Order {
            uid: "0f8e1a52-7c55-4d5b-9a4e-0b1a2c3d4e5f".into(),
            order_number: "A-001".into(),
            queue_number: 7,
            order_date: created.timestamp_millis(),
            user_id: "u1".into(),
            user_info: UserInfo {
                name: "Budi".into(),
                whatsapp: "6281111111111".into(),
                note: None,
            },
            items: vec![],
            total: 50000.0,
            payment_method: "Cash".into(),
            status: OrderStatus::Diproses,
            created_by: "Budi".into(),
            created_by_role: Role::User,
            updated_by: Some("Siti".into()),
            updated_by_role: Some(Role::Cashier),
            updated_at: Some(updated.timestamp_millis()),
        }
    }

    #[test]
    fn test_view_formats_money_and_dates() {
        let view = order_view(stored(), chrono_tz::Asia::Jakarta);
        assert_eq!(view.total, "Rp 50000.00");
        assert_eq!(view.order_date, "17-10-2026 08:00:00");
        assert_eq!(view.created_by_role, "user");
        assert_eq!(view.updated_at.as_deref(), Some("17-10-2026 15:04:05"));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "diproses");
        assert!(json.get("orders").is_some());
    }

    #[test]
    fn test_update_summary_uses_long_date() {
        let summary = order_updated(stored(), chrono_tz::Asia::Jakarta);
        assert_eq!(summary.updated_at.as_deref(), Some("17 Oktober 2026, 15:04 WIB"));
        assert_eq!(summary.updated_by_role.as_deref(), Some("cashier"));
    }
}
