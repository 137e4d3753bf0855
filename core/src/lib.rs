// slotbook/src/lib.rs

//! Slotbook: capacity-safe booking of time-slotted experiences.
//!
//! The crate holds the booking domain without any HTTP or SQL in it:
//!  - Catalog reads (experience listings, slots grouped by date).
//!  - Promo-code evaluation against a subtotal and a validity window.
//!  - A checkout pipeline of named stages (presence, email shape, quantity,
//!    promo re-validation, atomic reservation).
//!  - Collision-safe human-readable booking references.
//!  - The `BookingStore` seam, with an in-process implementation.
//!
//! Typical use:
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use slotbook::{BookingEngine, CreateBookingRequest, MemoryStore};
//! # async fn demo(request: CreateBookingRequest) -> slotbook::BookingResult<()> {
//! let engine = BookingEngine::new(Arc::new(MemoryStore::new()));
//! let confirmation = engine.create_booking(request).await?;
//! println!("booked {}", confirmation.reference_id);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod checkout;
pub mod engine;
pub mod error;
pub mod models;
pub mod promo;
pub mod reference;
pub mod request;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::catalog::{DateSlots, ExperienceDetail, ExperienceSummary, SlotView};
pub use crate::checkout::{CheckoutContext, CheckoutOutcome, CheckoutPipeline, CheckoutPolicy, StepControl};
pub use crate::engine::BookingEngine;
pub use crate::error::{BookingError, BookingResult, ErrorKind};
pub use crate::models::{Booking, BookingStatus, DiscountType, Experience, NewBooking, PromoCode, Slot};
pub use crate::promo::PromoQuote;
pub use crate::reference::{CodeSource, RandomCodes, ReferenceAllocator};
pub use crate::request::{BookingConfirmation, CreateBookingRequest};
pub use crate::store::{BookingStore, MemoryStore};
