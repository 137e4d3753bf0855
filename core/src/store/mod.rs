// slotbook/src/store/mod.rs

//! Persistence seam for the booking engine.
//!
//! A `BookingStore` is opened once per process and injected into the engine
//! (and the HTTP layer) as `Arc<dyn BookingStore>`. Everything except
//! [`BookingStore::reserve_and_record`] is a plain read.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::BookingResult;
use crate::models::{Booking, Experience, NewBooking, PromoCode, Slot};
use crate::reference::ReferenceAllocator;

pub use memory::MemoryStore;

#[async_trait]
pub trait BookingStore: Send + Sync {
  /// All experiences, or those whose name or location contains `search`
  /// (case-insensitive). Ordered by name.
  async fn list_experiences(&self, search: Option<&str>) -> BookingResult<Vec<Experience>>;

  async fn find_experience(&self, id: Uuid) -> BookingResult<Option<Experience>>;

  /// Slots of one experience, ordered by (date, time).
  async fn slots_for_experience(&self, experience_id: Uuid) -> BookingResult<Vec<Slot>>;

  async fn find_slot(&self, id: Uuid) -> BookingResult<Option<Slot>>;

  /// Lookup by already-normalized (uppercase) code.
  async fn find_promo_code(&self, code: &str) -> BookingResult<Option<PromoCode>>;

  async fn find_booking_by_reference(&self, reference_id: &str) -> BookingResult<Option<Booking>>;

  /// The atomic reservation. In one all-or-nothing unit:
  ///
  /// 1. load the slot (`NotFound` if absent),
  /// 2. refuse with `SlotUnavailable` if it cannot seat `booking.quantity`,
  /// 3. decrement its available count relative to the persisted value,
  /// 4. claim the first non-colliding code from `references`,
  /// 5. insert the confirmed booking.
  ///
  /// Any failure leaves the slot and the booking set exactly as they were.
  /// Concurrent calls for the same slot serialize; calls for different
  /// slots do not contend.
  async fn reserve_and_record(&self, booking: NewBooking, references: &ReferenceAllocator) -> BookingResult<Booking>;
}
