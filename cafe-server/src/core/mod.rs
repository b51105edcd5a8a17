//! Core module - configuration, state and server lifecycle
//!
//! - [`Config`] - environment driven configuration
//! - [`ServerState`] - shared handles passed to every handler
//! - [`Server`] - HTTP listener
//! - [`ServerError`] - startup failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
