// slotbook/src/models/mod.rs

//! Domain records held by a `BookingStore`.

pub mod booking;
pub mod experience;
pub mod promo_code;
pub mod slot;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use experience::Experience;
pub use promo_code::{normalize_code, DiscountType, PromoCode};
pub use slot::Slot;
