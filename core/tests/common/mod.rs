// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use slotbook::{
  CodeSource, CreateBookingRequest, DiscountType, Experience, MemoryStore, PromoCode, ReferenceAllocator, Slot,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Seeded store ---
pub struct Fixture {
  pub store: Arc<MemoryStore>,
  pub experience: Experience,
  pub slot: Slot,
}

pub fn experience(name: &str, location: &str, price: i64) -> Experience {
  Experience {
    id: Uuid::new_v4(),
    name: name.to_string(),
    location: location.to_string(),
    description: format!("{} in {}", name, location),
    about: "Helmet and life jackets provided.".to_string(),
    image_url: "http://localhost:3000/images/test.jpg".to_string(),
    price: Decimal::from(price),
    created_at: Utc::now(),
  }
}

pub fn slot_for(experience: &Experience, day: u32, hour: u32, capacity: i32, available: i32) -> Slot {
  Slot {
    id: Uuid::new_v4(),
    experience_id: experience.id,
    date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
    time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
    total_capacity: capacity,
    available_count: available,
  }
}

pub fn promo(code: &str, discount_type: DiscountType, value: i64, is_active: bool) -> PromoCode {
  let now = Utc::now();
  PromoCode {
    code: code.to_string(),
    discount_type,
    discount_value: Decimal::from(value),
    is_active,
    valid_from: now - Duration::days(30),
    valid_until: now + Duration::days(30),
  }
}

/// A store holding one experience with one slot of `capacity` seats, of which
/// `available` are free, plus the codes SAVE10, FLAT100, OLDCODE (inactive)
/// and LATER (window in the future).
pub fn seeded(capacity: i32, available: i32) -> Fixture {
  let store = Arc::new(MemoryStore::new());
  let exp = experience("Kayaking", "Udupi, Karnataka", 999);
  let slot = slot_for(&exp, 1, 9, capacity, available);
  store.insert_experience(exp.clone());
  store.insert_slot(slot.clone());

  store.insert_promo_code(promo("SAVE10", DiscountType::Percentage, 10, true));
  store.insert_promo_code(promo("FLAT100", DiscountType::Flat, 100, true));
  store.insert_promo_code(promo("OLDCODE", DiscountType::Flat, 50, false));
  let now = Utc::now();
  store.insert_promo_code(PromoCode {
    valid_from: now + Duration::days(1),
    valid_until: now + Duration::days(2),
    ..promo("LATER", DiscountType::Flat, 50, true)
  });

  Fixture {
    store,
    experience: exp,
    slot,
  }
}

/// A complete, valid checkout submission for `slot`.
pub fn request_for(slot: &Slot, quantity: i64) -> CreateBookingRequest {
  CreateBookingRequest {
    experience_id: Some(slot.experience_id.to_string()),
    slot_id: Some(slot.id.to_string()),
    date: Some(slot.date.format("%Y-%m-%d").to_string()),
    time: Some(slot.time_label()),
    quantity: Some(quantity),
    customer_name: Some("Asha Rao".to_string()),
    customer_email: Some("asha@example.com".to_string()),
    promo_code: None,
    agreed_to_terms: Some(true),
    base_price: Some(Decimal::from(999 * quantity)),
    discount_amount: Some(Decimal::ZERO),
    tax_amount: Some(Decimal::from(60 * quantity)),
    total_amount: Some(Decimal::from(1059 * quantity)),
  }
}

// --- Scripted reference codes ---
/// Hands out the queued codes in order, then falls back to a fixed filler.
pub struct ScriptedCodes(Mutex<VecDeque<String>>);

impl ScriptedCodes {
  pub fn new(codes: &[&str]) -> Arc<Self> {
    Arc::new(Self(Mutex::new(codes.iter().map(|c| c.to_string()).collect())))
  }
}

impl CodeSource for ScriptedCodes {
  fn next_code(&self, len: usize) -> String {
    self.0.lock().pop_front().unwrap_or_else(|| "Z".repeat(len))
  }
}

pub fn scripted_references(codes: &[&str], attempts_per_space: usize) -> ReferenceAllocator {
  ReferenceAllocator::new(ScriptedCodes::new(codes)).with_attempts_per_space(attempts_per_space)
}

pub fn fixed_instant() -> chrono::DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}
