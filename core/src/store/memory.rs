// slotbook/src/store/memory.rs

//! In-process `BookingStore`.
//!
//! Each slot sits behind its own mutex, so reservations for one slot
//! serialize while reservations for different slots run side by side. The
//! booking table and its reference index are sharded maps; claiming a
//! reference is an insert-if-absent on the index.
//!
//! Locks here are `parking_lot` locks and are never held across an `.await`:
//! every trait method does its work in a synchronous helper.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::models::{normalize_code, Booking, Experience, NewBooking, PromoCode, Slot};
use crate::reference::ReferenceAllocator;
use crate::store::BookingStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
  experiences: RwLock<HashMap<Uuid, Experience>>,
  slots: RwLock<HashMap<Uuid, Arc<Mutex<Slot>>>>,
  promo_codes: RwLock<HashMap<String, PromoCode>>,
  bookings: DashMap<Uuid, Booking>,
  references: DashMap<String, Uuid>,
  // When set, the booking insert fails after the capacity check has passed.
  fail_booking_writes: AtomicBool,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert_experience(&self, experience: Experience) {
    self.experiences.write().insert(experience.id, experience);
  }

  /// Panics if `available_count` is outside `0..=total_capacity`.
  pub fn insert_slot(&self, slot: Slot) {
    assert!(
      (0..=slot.total_capacity).contains(&slot.available_count),
      "slot {} has available_count {} outside 0..={}",
      slot.id,
      slot.available_count,
      slot.total_capacity
    );
    self.slots.write().insert(slot.id, Arc::new(Mutex::new(slot)));
  }

  pub fn insert_promo_code(&self, mut promo: PromoCode) {
    promo.code = normalize_code(&promo.code);
    self.promo_codes.write().insert(promo.code.clone(), promo);
  }

  /// Makes every subsequent booking insert fail with a storage error until
  /// switched off again.
  pub fn set_fail_booking_writes(&self, fail: bool) {
    self.fail_booking_writes.store(fail, Ordering::SeqCst);
  }

  pub fn bookings(&self) -> Vec<Booking> {
    self.bookings.iter().map(|entry| entry.value().clone()).collect()
  }

  pub fn bookings_for_slot(&self, slot_id: Uuid) -> Vec<Booking> {
    self
      .bookings
      .iter()
      .filter(|entry| entry.value().slot_id == slot_id)
      .map(|entry| entry.value().clone())
      .collect()
  }

  fn slot_handle(&self, id: Uuid) -> Option<Arc<Mutex<Slot>>> {
    self.slots.read().get(&id).cloned()
  }

  fn claim_reference(&self, references: &ReferenceAllocator, booking_id: Uuid) -> BookingResult<String> {
    for candidate in references.candidates() {
      match self.references.entry(candidate) {
        Entry::Vacant(vacant) => {
          let code = vacant.key().clone();
          vacant.insert(booking_id);
          return Ok(code);
        }
        Entry::Occupied(occupied) => {
          debug!(reference_id = %occupied.key(), "Reference code collision, drawing another.");
        }
      }
    }
    Err(BookingError::Internal(format!(
      "no free reference code after {} attempts",
      references.max_candidates()
    )))
  }

  fn reserve_locked(&self, new_booking: NewBooking, references: &ReferenceAllocator) -> BookingResult<Booking> {
    let handle = self
      .slot_handle(new_booking.slot_id)
      .ok_or_else(|| BookingError::NotFound("Slot not found".to_string()))?;
    let mut slot = handle.lock();

    if slot.experience_id != new_booking.experience_id {
      return Err(BookingError::NotFound("Slot not found for this experience".to_string()));
    }
    if !slot.can_seat(new_booking.quantity) {
      return Err(BookingError::SlotUnavailable {
        requested: new_booking.quantity,
        available: slot.available_count,
      });
    }
    // Staged; written back only once the booking is in.
    let remaining = slot.available_count - new_booking.quantity;

    let booking_id = Uuid::new_v4();
    let reference_id = self.claim_reference(references, booking_id)?;

    if self.fail_booking_writes.load(Ordering::SeqCst) {
      self.references.remove(&reference_id);
      warn!(slot_id = %slot.id, "Booking write rejected, releasing reference claim.");
      return Err(BookingError::storage(anyhow::anyhow!("booking write rejected by store")));
    }

    let booking = Booking::confirmed(booking_id, reference_id, new_booking, Utc::now());
    self.bookings.insert(booking.id, booking.clone());
    slot.available_count = remaining;
    Ok(booking)
  }
}

#[async_trait]
impl BookingStore for MemoryStore {
  async fn list_experiences(&self, search: Option<&str>) -> BookingResult<Vec<Experience>> {
    let needle = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
    let mut found: Vec<Experience> = self
      .experiences
      .read()
      .values()
      .filter(|exp| match &needle {
        Some(n) => exp.name.to_lowercase().contains(n) || exp.location.to_lowercase().contains(n),
        None => true,
      })
      .cloned()
      .collect();
    found.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(found)
  }

  async fn find_experience(&self, id: Uuid) -> BookingResult<Option<Experience>> {
    Ok(self.experiences.read().get(&id).cloned())
  }

  async fn slots_for_experience(&self, experience_id: Uuid) -> BookingResult<Vec<Slot>> {
    let handles: Vec<Arc<Mutex<Slot>>> = self.slots.read().values().cloned().collect();
    let mut slots: Vec<Slot> = handles
      .iter()
      .map(|h| h.lock().clone())
      .filter(|s| s.experience_id == experience_id)
      .collect();
    slots.sort_by_key(|s| (s.date, s.time));
    Ok(slots)
  }

  async fn find_slot(&self, id: Uuid) -> BookingResult<Option<Slot>> {
    Ok(self.slot_handle(id).map(|h| h.lock().clone()))
  }

  async fn find_promo_code(&self, code: &str) -> BookingResult<Option<PromoCode>> {
    Ok(self.promo_codes.read().get(code).cloned())
  }

  async fn find_booking_by_reference(&self, reference_id: &str) -> BookingResult<Option<Booking>> {
    let booking_id = match self.references.get(reference_id) {
      Some(entry) => *entry.value(),
      None => return Ok(None),
    };
    Ok(self.bookings.get(&booking_id).map(|entry| entry.value().clone()))
  }

  #[instrument(
    name = "MemoryStore::reserve_and_record",
    skip_all,
    fields(slot_id = %new_booking.slot_id, quantity = new_booking.quantity)
  )]
  async fn reserve_and_record(&self, new_booking: NewBooking, references: &ReferenceAllocator) -> BookingResult<Booking> {
    self.reserve_locked(new_booking, references)
  }
}
