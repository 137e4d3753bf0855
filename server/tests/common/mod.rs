// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use slotbook::{DiscountType, Experience, MemoryStore, PromoCode, Slot};
use slotbook_server::config::{AllowedOrigins, AppConfig, LogFormat};
use slotbook_server::AppState;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

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

/// Builds the full app (routes, extractor config, 404 fallback, CORS) over `$state`.
#[allow(unused_macros)]
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .configure(slotbook_server::web::configure_app(actix_web::web::Data::new($state)))
        .default_service(actix_web::web::to(slotbook_server::web::not_found_handler))
        .wrap(actix_web::middleware::from_fn(slotbook_server::web::cors::cors)),
    )
    .await
  };
}

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: String::new(),
    database_max_connections: 1,
    app_base_url: "http://localhost:3000".to_string(),
    allowed_origins: AllowedOrigins::parse("http://localhost:5173"),
    seed_db: false,
    promo_revalidation: true,
    log_format: LogFormat::Pretty,
  }
}

pub struct Catalog {
  pub store: Arc<MemoryStore>,
  pub kayaking: Experience,
  pub cruise: Experience,
  /// Kayaking, day 1 09:00, 10 of 10 free.
  pub open_slot: Slot,
  /// Kayaking, day 1 07:00, 1 of 10 free.
  pub last_seat: Slot,
}

impl Catalog {
  pub fn state(&self) -> AppState {
    AppState::new(self.store.clone(), Arc::new(test_config()))
  }
}

fn experience(name: &str, location: &str, price: i64) -> Experience {
  Experience {
    id: Uuid::new_v4(),
    name: name.to_string(),
    location: location.to_string(),
    description: format!("{} description", name),
    about: format!("About {}", name),
    image_url: format!("http://localhost:3000/images/{}.png", name.to_lowercase()),
    price: Decimal::from(price),
    created_at: Utc::now(),
  }
}

fn slot(experience: &Experience, day: u32, hour: u32, available: i32) -> Slot {
  Slot {
    id: Uuid::new_v4(),
    experience_id: experience.id,
    date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
    time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
    total_capacity: 10,
    available_count: available,
  }
}

pub fn catalog() -> Catalog {
  let store = Arc::new(MemoryStore::new());
  let kayaking = experience("Kayaking", "Udupi, Karnataka", 999);
  let cruise = experience("Boat Cruise", "Mandovi River, Goa", 1499);
  let open_slot = slot(&kayaking, 1, 9, 10);
  let last_seat = slot(&kayaking, 1, 7, 1);
  store.insert_experience(kayaking.clone());
  store.insert_experience(cruise.clone());
  store.insert_slot(open_slot.clone());
  store.insert_slot(last_seat.clone());
  store.insert_slot(slot(&kayaking, 2, 14, 4));
  store.insert_slot(slot(&cruise, 1, 16, 10));

  let now = Utc::now();
  let current = (now - Duration::days(1), now + Duration::days(1));
  let lapsed = (now - Duration::days(30), now - Duration::days(1));
  for (code, discount_type, value, active, (valid_from, valid_until)) in [
    ("SAVE10", DiscountType::Percentage, 10, true, current),
    ("FLAT100", DiscountType::Flat, 100, true, current),
    ("RETIRED", DiscountType::Flat, 100, false, current),
    ("EXPIRED", DiscountType::Percentage, 10, true, lapsed),
  ] {
    store.insert_promo_code(PromoCode {
      code: code.to_string(),
      discount_type,
      discount_value: Decimal::from(value),
      is_active: active,
      valid_from,
      valid_until,
    });
  }

  Catalog {
    store,
    kayaking,
    cruise,
    open_slot,
    last_seat,
  }
}

pub fn booking_body(slot: &Slot, quantity: i64) -> Value {
  json!({
    "experienceId": slot.experience_id,
    "slotId": slot.id,
    "date": slot.date.format("%Y-%m-%d").to_string(),
    "time": slot.time_label(),
    "quantity": quantity,
    "customerName": "Asha Rao",
    "customerEmail": "asha@example.com",
    "agreedToTerms": true,
    "basePrice": 999 * quantity,
    "discountAmount": 0,
    "taxAmount": 60 * quantity,
    "totalAmount": 1059 * quantity
  })
}
