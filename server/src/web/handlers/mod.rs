// slotbook-server/src/web/handlers/mod.rs

pub mod booking_handlers;
pub mod experience_handlers;
pub mod fallback_handlers;
pub mod promo_handlers;
