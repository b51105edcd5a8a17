//! Authentication and authorization
//!
//! - [`JwtService`] - token issuing and validation
//! - [`CurrentUser`] - caller identity taken from the token
//! - [`require_role`] - role gate middleware
//! - [`RateLimiterRegistry`] - per-key token buckets
//! - [`password`] - argon2 hashing and one-time password generation

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod rate_limit;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_role;
pub use rate_limit::RateLimiterRegistry;
