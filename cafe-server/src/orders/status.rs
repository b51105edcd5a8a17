//! Order status state machine
//!
//! ```text
//! terkirim ──► diproses ──► selesai
//!    │  └──────────────────►  ▲
//!    └──► dibatalkan          │
//! ```
//!
//! `diproses -> diproses` is accepted and only re-stamps the updater.
//! `selesai` and `dibatalkan` are terminal.

use shared::models::OrderStatus;
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("'{0}' is not a status an order can be moved to")]
    InvalidTarget(String),

    #[error("order is {current}; only orders that are terkirim can be cancelled")]
    NotCancellable { current: OrderStatus },

    #[error("order is already {current} and can no longer change")]
    Terminal { current: OrderStatus },
}

impl TransitionError {
    /// Status the order was in when the move was refused
    pub fn current(&self) -> Option<OrderStatus> {
        match self {
            Self::InvalidTarget(_) => None,
            Self::NotCancellable { current } | Self::Terminal { current } => Some(*current),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err.current() {
            None => AppError::with_message(ErrorCode::InvalidOrderStatus, err.to_string()),
            Some(current) => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, err.to_string())
                    .with_detail("current_status", current.as_str())
            }
        }
    }
}

/// Parse a requested status; `terkirim` is only ever an initial state
pub fn parse_target(raw: &str) -> Result<OrderStatus, TransitionError> {
    match raw.trim().parse::<OrderStatus>() {
        Ok(OrderStatus::Terkirim) | Err(_) => Err(TransitionError::InvalidTarget(raw.to_string())),
        Ok(status) => Ok(status),
    }
}

/// Check that `current -> requested` is a legal move
pub fn check_transition(current: OrderStatus, requested: OrderStatus) -> Result<(), TransitionError> {
    use OrderStatus::*;

    match (current, requested) {
        (_, Terkirim) => Err(TransitionError::InvalidTarget(requested.to_string())),
        (Selesai | Dibatalkan, _) => Err(TransitionError::Terminal { current }),
        (Terkirim, Diproses | Selesai | Dibatalkan) => Ok(()),
        (Diproses, Diproses | Selesai) => Ok(()),
        (Diproses, Dibatalkan) => Err(TransitionError::NotCancellable { current }),
    }
}
