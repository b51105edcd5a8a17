//! Data models
//!
//! Request payloads and API projections shared by the server and its clients.
//! Identities are UUID strings; money in projections is a formatted string.

pub mod banner;
pub mod category;
pub mod menu;
pub mod order;
pub mod product;
pub mod upload;
pub mod user;

// Re-exports
pub use banner::*;
pub use category::*;
pub use menu::*;
pub use order::*;
pub use product::*;
pub use upload::*;
pub use user::*;
