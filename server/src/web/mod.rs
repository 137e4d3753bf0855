// slotbook-server/src/web/mod.rs

pub mod cors;
pub mod envelope;
pub mod handlers;
pub mod routes;

pub use routes::{configure_app, not_found_handler};
