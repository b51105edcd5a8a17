//! Typed partial update of an order

use serde::Serialize;
use shared::models::{OrderItem, OrderStatus, OrderUpdate, Role, UserInfo};

use super::builder::validate_user_info;
use super::status::parse_target;
use crate::utils::{AppError, AppResult, ErrorCode};

/// A validated update request
///
/// Built from the wire payload by [`OrderPatch::from_request`]; every field is
/// independently optional.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub user_info: Option<UserInfo>,
    pub items: Option<Vec<OrderItem>>,
}

impl OrderPatch {
    /// Validate an update payload
    ///
    /// A non-null `queue_number` is refused before anything else is looked at.
    pub fn from_request(update: OrderUpdate) -> AppResult<Self> {
        if update.queue_number.as_ref().is_some_and(|v| !v.is_null()) {
            return Err(AppError::new(ErrorCode::QueueNumberImmutable)
                .with_detail("field", "queue_number"));
        }

        let status = update
            .status
            .as_deref()
            .map(parse_target)
            .transpose()
            .map_err(AppError::from)?;

        let user_info = update.user_info.map(validate_user_info).transpose()?;

        let patch = Self {
            status,
            user_info,
            items: update.items,
        };
        if patch.is_empty() {
            return Err(AppError::validation(
                "Nothing to update: expected status, user_info or orders",
            ));
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.user_info.is_none() && self.items.is_none()
    }

    /// Document fragment to merge; updater fields are set only with a status
    pub(crate) fn into_merge(self, updater: Option<(&str, Role, i64)>) -> OrderMerge {
        let (updated_by, updated_by_role, updated_at) = match updater {
            Some((name, role, at)) => (Some(name.to_string()), Some(role), Some(at)),
            None => (None, None, None),
        };
        OrderMerge {
            status: self.status,
            user_info: self.user_info,
            items: self.items,
            updated_by,
            updated_by_role,
            updated_at,
        }
    }
}

/// Fields written by an update; absent fields are left untouched
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OrderMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by_role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}
