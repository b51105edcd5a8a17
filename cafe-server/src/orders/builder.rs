//! Order entity builder

use shared::models::{OrderCreate, OrderStatus, UserInfo};

use crate::db::models::{Order, User};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Payment methods an order may be submitted with
pub const ACCEPTED_PAYMENT_METHODS: &[&str] = &["Cash"];

/// Validate a submitted draft and build the order to store
///
/// The identity is left empty for the store to assign. `total` is stored as
/// submitted.
pub fn build_order(draft: OrderCreate, creator: &User, now: i64) -> AppResult<Order> {
    let user_info = validate_user_info(draft.user_info)?;

    if !ACCEPTED_PAYMENT_METHODS.contains(&draft.payment_method.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::PaymentInvalidMethod,
            format!(
                "Payment method '{}' is not accepted; allowed: {}",
                draft.payment_method,
                ACCEPTED_PAYMENT_METHODS.join(", ")
            ),
        )
        .with_detail("payment_method", draft.payment_method));
    }

    if !draft.total.is_finite() || draft.total < 0.0 {
        return Err(AppError::validation("total must be a non-negative amount"));
    }

    Ok(Order {
        uid: String::new(),
        order_number: draft.order_number,
        queue_number: draft.queue_number,
        order_date: now,
        user_id: creator.uid.clone(),
        user_info,
        items: draft.items,
        total: draft.total,
        payment_method: draft.payment_method,
        status: OrderStatus::Terkirim,
        created_by: creator.name.clone(),
        created_by_role: creator.role,
        updated_by: None,
        updated_by_role: None,
        updated_at: None,
    })
}

/// `name` and `whatsapp` are required; surrounding whitespace is dropped
pub(crate) fn validate_user_info(info: UserInfo) -> AppResult<UserInfo> {
    let name = info.name.trim().to_string();
    let whatsapp = info.whatsapp.trim().to_string();
    if name.is_empty() || whatsapp.is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, "user_info requires name and whatsapp")
                .with_detail("field", "user_info"),
        );
    }
    let note = info
        .note
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    Ok(UserInfo {
        name,
        whatsapp,
        note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderItem, Role};

    fn creator() -> User {
        let mut user = User::new(
            "Siti".into(),
            "6281234567890".into(),
            "siti@example.com".into(),
            String::new(),
            Role::Cashier,
            0,
        );
        user.uid = "7b6f3c1e-3f0a-4f57-9a55-0d8a1d6c2f10".into();
        user
    }

    fn draft(payment_method: &str) -> OrderCreate {
        OrderCreate {
            order_number: "A-001".into(),
            queue_number: 7,
            user_info: UserInfo {
                name: " Budi ".into(),
                whatsapp: "6281111111111".into(),
                note: Some("  ".into()),
            },
            items: vec![OrderItem {
                menu_id: "M1".into(),
                quantity: 2,
                price: None,
                menu_name: None,
            }],
            total: 50000.0,
            payment_method: payment_method.into(),
        }
    }

    #[test]
    fn test_build_sets_server_fields() {
        let order = build_order(draft("Cash"), &creator(), 1_700_000_000_000).unwrap();
        assert_eq!(order.status, OrderStatus::Terkirim);
        assert_eq!(order.order_date, 1_700_000_000_000);
        assert_eq!(order.created_by, "Siti");
        assert_eq!(order.created_by_role, Role::Cashier);
        assert_eq!(order.user_id, "7b6f3c1e-3f0a-4f57-9a55-0d8a1d6c2f10");
        assert_eq!(order.user_info.name, "Budi");
        assert_eq!(order.user_info.note, None);
        assert_eq!(order.total, 50000.0);
        assert!(order.updated_at.is_none());
    }

    #[test]
    fn test_only_cash_is_accepted() {
        for method in ["Transfer", "cash", ""] {
            let err = build_order(draft(method), &creator(), 0).unwrap_err();
            assert_eq!(err.code, ErrorCode::PaymentInvalidMethod);
            assert_eq!(err.http_status().as_u16(), 400);
        }
    }

    #[test]
    fn test_user_info_is_required() {
        let mut missing_phone = draft("Cash");
        missing_phone.user_info.whatsapp = "   ".into();
        let err = build_order(missing_phone, &creator(), 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.http_status().as_u16(), 400);
    }
}
