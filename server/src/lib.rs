// slotbook-server/src/lib.rs

//! HTTP storefront over the slotbook engine: actix-web handlers, PostgreSQL
//! persistence, configuration and logging setup.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod state;
pub mod telemetry;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
