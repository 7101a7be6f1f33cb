// server/src/lib.rs

//! HTTP surface of the storefront: configuration, error mapping and the `/api` routes.

pub mod config;
pub mod errors;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
