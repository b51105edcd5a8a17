//! HTTP API
//!
//! One module per resource; each exposes `router()` returning a
//! `Router<ServerState>` that [`crate::routes::build_router`] merges.
//!
//! | module | prefix | auth |
//! |--------|--------|------|
//! | [`health`] | /health | none |
//! | [`auth`] | /api/auth | none, `me` bearer |
//! | [`dashboard`] | /api/dashboard | bearer + role |
//! | [`orders`] | /api/order | bearer |
//! | [`menu`], [`categories`], [`banners`], [`products`] | /api/{menu,category,banner,product} | reads none, writes bearer |
//! | [`upload`] | /api/image | bearer |

pub mod auth;
pub mod banners;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod menu;
pub mod multipart;
pub mod orders;
pub mod products;
pub mod upload;

/// Treat blank strings as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
