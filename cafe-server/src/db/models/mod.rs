//! Stored record types
//!
//! Records keep their identity in `uid`; the SurrealDB record id is the same
//! string and is ignored on read.

pub mod banner;
pub mod category;
pub mod menu;
pub mod one_time_password;
pub mod order;
pub mod product;
pub mod user;

pub use banner::Banner;
pub use category::Category;
pub use menu::MenuItem;
pub use one_time_password::OneTimePassword;
pub use order::Order;
pub use product::Product;
pub use user::User;

/// Implement [`Document`](crate::db::Document) for a record with a `uid` field
macro_rules! document {
    ($ty:ty, $collection:literal) => {
        impl $crate::db::Document for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> &str {
                &self.uid
            }

            fn assign_id(&mut self, id: String) {
                self.uid = id;
            }
        }
    };
}

pub(crate) use document;
