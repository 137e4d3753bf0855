// slotbook-server/src/db/seed.rs

//! Demo catalog for local development, loaded when `SEED_DB=true`.

use chrono::{Datelike, Duration, NaiveTime, TimeZone, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};

pub const SLOT_DAYS: i64 = 30;
pub const SLOT_TIMES: [(u32, u32); 4] = [(7, 0), (9, 0), (14, 0), (16, 0)];
pub const SLOT_CAPACITY: i32 = 10;

struct SeedExperience {
  name: &'static str,
  location: &'static str,
  description: &'static str,
  about: &'static str,
  image: &'static str,
  price: i64,
}

const EXPERIENCES: [SeedExperience; 5] = [
  SeedExperience {
    name: "Kayaking",
    location: "Udupi, Karnataka",
    description: "Curated small-group experience. Certified guide. Safety briefing.",
    about: "Experience the thrill of kayaking through scenic routes with trained guides. Includes safety briefing, equipment, and refreshments.",
    image: "kayaking.png",
    price: 999,
  },
  SeedExperience {
    name: "Nandi Hills Sunrise",
    location: "Nandi Hills, Karnataka",
    description: "Early morning trek to witness breathtaking sunrise views. Guided tour with breakfast.",
    about: "Start your day with a magical sunrise at Nandi Hills. Includes guided trek, photography spots, and traditional breakfast.",
    image: "nandi-hills.png",
    price: 799,
  },
  SeedExperience {
    name: "Coffee Trail",
    location: "Coorg, Karnataka",
    description: "Explore coffee plantations and learn about coffee making. Includes tasting session.",
    about: "Walk through lush coffee estates, learn the art of coffee making from bean to cup, and enjoy fresh coffee tasting.",
    image: "coffee-trail.png",
    price: 1299,
  },
  SeedExperience {
    name: "Boat Cruise",
    location: "Mandovi River, Goa",
    description: "Relaxing sunset cruise with live music and dinner. Perfect for families and couples.",
    about: "Enjoy a serene evening on the Mandovi River with live entertainment, delicious dinner, and stunning sunset views.",
    image: "boat-cruise.png",
    price: 1499,
  },
  SeedExperience {
    name: "Bungee Jumping",
    location: "Rishikesh, Uttarakhand",
    description: "Adrenaline-pumping bungee jump from 83 meters. Safety certified and experienced crew.",
    about: "Take the leap of faith with India's highest bungee jump. Includes safety gear, training, and video recording of your jump.",
    image: "bungee-jumping.png",
    price: 3500,
  },
];

/// Replaces every table's contents with the demo catalog: promo codes SAVE10
/// and FLAT100 valid for the current calendar year, five experiences, and
/// `SLOT_DAYS` days of slots per experience with random availability.
#[instrument(name = "db::seed", skip(pool))]
pub async fn seed(pool: &PgPool, image_base_url: &str) -> Result<()> {
  let mut tx = pool.begin().await?;

  sqlx::query("DELETE FROM bookings").execute(&mut *tx).await?;
  sqlx::query("DELETE FROM slots").execute(&mut *tx).await?;
  sqlx::query("DELETE FROM experiences").execute(&mut *tx).await?;
  sqlx::query("DELETE FROM promo_codes").execute(&mut *tx).await?;

  let year = Utc::now().year();
  let valid_from = Utc
    .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
    .single()
    .ok_or_else(|| AppError::Internal(format!("no start of year {}", year)))?;
  let valid_until = Utc
    .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
    .single()
    .ok_or_else(|| AppError::Internal(format!("no end of year {}", year)))?;
  for (code, discount_type, value) in [("SAVE10", "percentage", 10), ("FLAT100", "flat", 100)] {
    sqlx::query(
      "INSERT INTO promo_codes (code, discount_type, discount_value, is_active, valid_from, valid_until) \
       VALUES ($1, $2, $3, TRUE, $4, $5)",
    )
    .bind(code)
    .bind(discount_type)
    .bind(Decimal::from(value))
    .bind(valid_from)
    .bind(valid_until)
    .execute(&mut *tx)
    .await?;
  }

  let today = Utc::now().date_naive();
  let base = image_base_url.trim_end_matches('/');
  let mut slot_total = 0usize;
  for exp in EXPERIENCES.iter() {
    let experience_id = Uuid::new_v4();
    sqlx::query(
      "INSERT INTO experiences (id, name, location, description, about, image_url, price) \
       VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(experience_id)
    .bind(exp.name)
    .bind(exp.location)
    .bind(exp.description)
    .bind(exp.about)
    .bind(format!("{}/images/{}", base, exp.image))
    .bind(Decimal::from(exp.price))
    .execute(&mut *tx)
    .await?;

    for day in 0..SLOT_DAYS {
      let date = today + Duration::days(day);
      for (hour, minute) in SLOT_TIMES {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
          .ok_or_else(|| AppError::Internal(format!("bad seed time {}:{}", hour, minute)))?;
        // Not held across the await below.
        let available = rand::thread_rng().gen_range(0..=SLOT_CAPACITY);
        sqlx::query(
          "INSERT INTO slots (id, experience_id, date, time, total_capacity, available_count) \
           VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4())
        .bind(experience_id)
        .bind(date)
        .bind(time)
        .bind(SLOT_CAPACITY)
        .bind(available)
        .execute(&mut *tx)
        .await?;
        slot_total += 1;
      }
    }
  }

  tx.commit().await?;
  info!(
    experiences = EXPERIENCES.len(),
    slots = slot_total,
    promo_codes = 2,
    "Database seed completed."
  );
  Ok(())
}
