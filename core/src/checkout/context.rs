// slotbook/src/checkout/context.rs

use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::models::Booking;
use crate::reference::ReferenceAllocator;
use crate::request::CreateBookingRequest;
use crate::store::BookingStore;

/// Everything one checkout run reads and produces.
pub struct CheckoutState {
  pub store: Arc<dyn BookingStore>,
  pub references: ReferenceAllocator,
  pub request: CreateBookingRequest,
  /// Clock reading taken when the checkout started.
  pub started_at: DateTime<Utc>,
  /// Set by `check_quantity`.
  pub quantity: Option<i32>,
  /// Set by `reserve_and_record`.
  pub booking: Option<Booking>,
  /// Names of the stages that ran, in order.
  pub completed_steps: Vec<&'static str>,
}

impl std::fmt::Debug for CheckoutState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CheckoutState")
      .field("slot_id", &self.request.slot_id)
      .field("quantity", &self.quantity)
      .field("booking_id", &self.booking.as_ref().map(|b| b.id))
      .field("completed_steps", &self.completed_steps)
      .finish()
  }
}

/// Shared handle to a `CheckoutState`.
///
/// Guards from `read`/`write` are blocking locks and must be dropped before
/// any `.await`.
#[derive(Debug, Clone)]
pub struct CheckoutContext(Arc<RwLock<CheckoutState>>);

impl CheckoutContext {
  pub fn new(
    store: Arc<dyn BookingStore>,
    references: ReferenceAllocator,
    request: CreateBookingRequest,
    started_at: DateTime<Utc>,
  ) -> Self {
    CheckoutContext(Arc::new(RwLock::new(CheckoutState {
      store,
      references,
      request,
      started_at,
      quantity: None,
      booking: None,
      completed_steps: Vec::new(),
    })))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, CheckoutState> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, CheckoutState> {
    self.0.write()
  }
}
