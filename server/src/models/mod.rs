// slotbook-server/src/models/mod.rs

//! Row types as they come out of PostgreSQL, and their conversion into the
//! engine's domain records.

pub mod booking;
pub mod experience;
pub mod promo_code;
pub mod slot;

pub use booking::BookingRow;
pub use experience::ExperienceRow;
pub use promo_code::PromoCodeRow;
pub use slot::SlotRow;
