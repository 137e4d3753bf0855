// slotbook-server/src/db/pg_store.rs

//! `BookingStore` over a PostgreSQL pool.
//!
//! A reservation is one transaction. The slot row is locked with
//! `FOR UPDATE`, so concurrent reservations for the same slot queue on the
//! row while other slots proceed. The decrement is additionally conditional
//! on the persisted count, and reference codes are claimed with
//! `ON CONFLICT DO NOTHING`, which never aborts the transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbook::reference::ReferenceAllocator;
use slotbook::{Booking, BookingError, BookingResult, BookingStore, Experience, NewBooking, PromoCode, Slot};
use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::models::booking::BOOKING_COLUMNS;
use crate::models::experience::EXPERIENCE_COLUMNS;
use crate::models::promo_code::PROMO_CODE_COLUMNS;
use crate::models::slot::SLOT_COLUMNS;
use crate::models::{BookingRow, ExperienceRow, PromoCodeRow, SlotRow};

#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

/// `%term%` for ILIKE, with the pattern metacharacters in `term` escaped.
fn contains_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for ch in term.chars() {
    if matches!(ch, '\\' | '%' | '_') {
      pattern.push('\\');
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

#[async_trait]
impl BookingStore for PgStore {
  async fn list_experiences(&self, search: Option<&str>) -> BookingResult<Vec<Experience>> {
    let pattern = search.map(str::trim).filter(|s| !s.is_empty()).map(contains_pattern);
    let sql = format!(
      "SELECT {} FROM experiences \
       WHERE $1::text IS NULL OR name ILIKE $1 OR location ILIKE $1 \
       ORDER BY name ASC",
      EXPERIENCE_COLUMNS
    );
    let rows: Vec<ExperienceRow> = sqlx::query_as(&sql)
      .bind(pattern)
      .fetch_all(&self.pool)
      .await
      .map_err(BookingError::storage)?;
    Ok(rows.into_iter().map(Experience::from).collect())
  }

  async fn find_experience(&self, id: Uuid) -> BookingResult<Option<Experience>> {
    let sql = format!("SELECT {} FROM experiences WHERE id = $1", EXPERIENCE_COLUMNS);
    let row: Option<ExperienceRow> = sqlx::query_as(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookingError::storage)?;
    Ok(row.map(Experience::from))
  }

  async fn slots_for_experience(&self, experience_id: Uuid) -> BookingResult<Vec<Slot>> {
    let sql = format!(
      "SELECT {} FROM slots WHERE experience_id = $1 ORDER BY date ASC, time ASC",
      SLOT_COLUMNS
    );
    let rows: Vec<SlotRow> = sqlx::query_as(&sql)
      .bind(experience_id)
      .fetch_all(&self.pool)
      .await
      .map_err(BookingError::storage)?;
    Ok(rows.into_iter().map(Slot::from).collect())
  }

  async fn find_slot(&self, id: Uuid) -> BookingResult<Option<Slot>> {
    let sql = format!("SELECT {} FROM slots WHERE id = $1", SLOT_COLUMNS);
    let row: Option<SlotRow> = sqlx::query_as(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookingError::storage)?;
    Ok(row.map(Slot::from))
  }

  async fn find_promo_code(&self, code: &str) -> BookingResult<Option<PromoCode>> {
    let sql = format!("SELECT {} FROM promo_codes WHERE code = $1", PROMO_CODE_COLUMNS);
    let row: Option<PromoCodeRow> = sqlx::query_as(&sql)
      .bind(code)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookingError::storage)?;
    row.map(PromoCode::try_from).transpose()
  }

  async fn find_booking_by_reference(&self, reference_id: &str) -> BookingResult<Option<Booking>> {
    let sql = format!("SELECT {} FROM bookings WHERE reference_id = $1", BOOKING_COLUMNS);
    let row: Option<BookingRow> = sqlx::query_as(&sql)
      .bind(reference_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookingError::storage)?;
    row.map(Booking::try_from).transpose()
  }

  #[instrument(
    name = "PgStore::reserve_and_record",
    skip_all,
    fields(slot_id = %new_booking.slot_id, quantity = new_booking.quantity)
  )]
  async fn reserve_and_record(&self, new_booking: NewBooking, references: &ReferenceAllocator) -> BookingResult<Booking> {
    // Every early return drops `tx`, which rolls it back.
    let mut tx = self.pool.begin().await.map_err(BookingError::storage)?;

    let lock_sql = format!("SELECT {} FROM slots WHERE id = $1 FOR UPDATE", SLOT_COLUMNS);
    let slot: SlotRow = sqlx::query_as(&lock_sql)
      .bind(new_booking.slot_id)
      .fetch_optional(&mut *tx)
      .await
      .map_err(BookingError::storage)?
      .ok_or_else(|| BookingError::NotFound("Slot not found".to_string()))?;

    if slot.experience_id != new_booking.experience_id {
      return Err(BookingError::NotFound("Slot not found for this experience".to_string()));
    }
    if slot.available_count < new_booking.quantity {
      return Err(BookingError::SlotUnavailable {
        requested: new_booking.quantity,
        available: slot.available_count,
      });
    }

    let decremented = sqlx::query(
      "UPDATE slots SET available_count = available_count - $2 WHERE id = $1 AND available_count >= $2",
    )
    .bind(new_booking.slot_id)
    .bind(new_booking.quantity)
    .execute(&mut *tx)
    .await
    .map_err(BookingError::storage)?;
    if decremented.rows_affected() != 1 {
      warn!("Conditional decrement matched no row under lock.");
      return Err(BookingError::SlotUnavailable {
        requested: new_booking.quantity,
        available: slot.available_count,
      });
    }

    let booking_id = Uuid::new_v4();
    for candidate in references.candidates() {
      let created_at: Option<DateTime<Utc>> = sqlx::query_scalar(
        "INSERT INTO bookings (id, reference_id, experience_id, slot_id, customer_name, customer_email, quantity, \
           base_price, discount_amount, tax_amount, total_amount, promo_code, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         ON CONFLICT (reference_id) DO NOTHING \
         RETURNING created_at",
      )
      .bind(booking_id)
      .bind(&candidate)
      .bind(new_booking.experience_id)
      .bind(new_booking.slot_id)
      .bind(&new_booking.customer_name)
      .bind(&new_booking.customer_email)
      .bind(new_booking.quantity)
      .bind(new_booking.base_price)
      .bind(new_booking.discount_amount)
      .bind(new_booking.tax_amount)
      .bind(new_booking.total_amount)
      .bind(&new_booking.promo_code)
      .bind(slotbook::BookingStatus::Confirmed.as_str())
      .fetch_optional(&mut *tx)
      .await
      .map_err(BookingError::storage)?;

      match created_at {
        Some(created_at) => {
          tx.commit().await.map_err(BookingError::storage)?;
          return Ok(Booking::confirmed(booking_id, candidate, new_booking, created_at));
        }
        None => debug!(reference_id = %candidate, "Reference code collision, drawing another."),
      }
    }

    Err(BookingError::Internal(format!(
      "no free reference code after {} attempts",
      references.max_candidates()
    )))
  }
}
