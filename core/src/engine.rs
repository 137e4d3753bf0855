// slotbook/src/engine.rs

//! Defines `BookingEngine`, the entry point for creating bookings.
//! The engine owns one shared checkout pipeline and runs a fresh
//! `CheckoutContext` through it per request.

use chrono::Utc;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::checkout::{standard_pipeline, CheckoutContext, CheckoutOutcome, CheckoutPipeline, CheckoutPolicy};
use crate::error::{BookingError, BookingResult};
use crate::models::Booking;
use crate::reference::ReferenceAllocator;
use crate::request::{BookingConfirmation, CreateBookingRequest};
use crate::store::BookingStore;

pub struct BookingEngine {
  store: Arc<dyn BookingStore>,
  references: ReferenceAllocator,
  pipeline: Arc<CheckoutPipeline>,
}

impl std::fmt::Debug for BookingEngine {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BookingEngine")
      .field("references", &self.references)
      .field("pipeline", &self.pipeline)
      .finish()
  }
}

impl BookingEngine {
  pub fn new(store: Arc<dyn BookingStore>) -> Self {
    Self::with_policy(store, CheckoutPolicy::default())
  }

  pub fn with_policy(store: Arc<dyn BookingStore>, policy: CheckoutPolicy) -> Self {
    Self {
      store,
      references: ReferenceAllocator::default(),
      pipeline: Arc::new(standard_pipeline(policy)),
    }
  }

  /// Replaces the reference-code allocator (tests use scripted code sources).
  pub fn with_references(mut self, references: ReferenceAllocator) -> Self {
    self.references = references;
    self
  }

  /// Replaces the checkout pipeline wholesale.
  pub fn with_pipeline(mut self, pipeline: CheckoutPipeline) -> Self {
    self.pipeline = Arc::new(pipeline);
    self
  }

  pub fn store(&self) -> &Arc<dyn BookingStore> {
    &self.store
  }

  pub fn pipeline(&self) -> &CheckoutPipeline {
    &self.pipeline
  }

  /// Validates `request`, then reserves seats and records a confirmed
  /// booking in one atomic unit.
  #[instrument(
    name = "BookingEngine::create_booking",
    skip_all,
    fields(slot_id = ?request.slot_id, quantity = ?request.quantity)
  )]
  pub async fn create_booking(&self, request: CreateBookingRequest) -> BookingResult<BookingConfirmation> {
    let booking = self.checkout(request).await?;
    Ok(BookingConfirmation::from(&booking))
  }

  /// Like `create_booking` but hands back the full stored booking.
  pub async fn checkout(&self, request: CreateBookingRequest) -> BookingResult<Booking> {
    let ctx = CheckoutContext::new(self.store.clone(), self.references.clone(), request, Utc::now());

    match self.pipeline.run(ctx.clone()).await? {
      CheckoutOutcome::Completed => {}
      CheckoutOutcome::Stopped => {
        event!(Level::ERROR, "Checkout stopped before a booking was recorded.");
        return Err(BookingError::Internal("checkout stopped before completion".to_string()));
      }
    }

    let booking = ctx.write().booking.take();
    booking.ok_or_else(|| {
      event!(Level::ERROR, "Checkout completed without recording a booking.");
      BookingError::Internal("checkout completed without a booking".to_string())
    })
  }
}
