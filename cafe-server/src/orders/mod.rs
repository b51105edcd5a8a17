//! Order lifecycle
//!
//! - [`builder`]: turns a submitted draft into a stored order
//! - [`status`]: the status state machine
//! - [`patch`]: typed partial updates
//! - [`projection`]: API views with formatted money and dates
//! - [`service`]: the operations behind the order endpoints

pub mod builder;
pub mod patch;
pub mod projection;
pub mod service;
pub mod status;

pub use builder::{ACCEPTED_PAYMENT_METHODS, build_order};
pub use patch::OrderPatch;
pub use service::OrderService;
pub use status::{TransitionError, check_transition};
