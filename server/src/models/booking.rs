// slotbook-server/src/models/booking.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use slotbook::{Booking, BookingError, BookingStatus};
use sqlx::FromRow;
use uuid::Uuid;

pub const BOOKING_COLUMNS: &str = "id, reference_id, experience_id, slot_id, customer_name, customer_email, quantity, \
   base_price, discount_amount, tax_amount, total_amount, promo_code, status, created_at";

#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
  pub id: Uuid,
  pub reference_id: String,
  pub experience_id: Uuid,
  pub slot_id: Uuid,
  pub customer_name: String,
  pub customer_email: String,
  pub quantity: i32,
  pub base_price: Decimal,
  pub discount_amount: Decimal,
  pub tax_amount: Decimal,
  pub total_amount: Decimal,
  pub promo_code: Option<String>,
  pub status: String,
  pub created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
  type Error = BookingError;

  fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
    let status = row
      .status
      .parse::<BookingStatus>()
      .map_err(|e| BookingError::Internal(format!("booking {}: {}", row.id, e)))?;
    Ok(Booking {
      id: row.id,
      reference_id: row.reference_id,
      experience_id: row.experience_id,
      slot_id: row.slot_id,
      customer_name: row.customer_name,
      customer_email: row.customer_email,
      quantity: row.quantity,
      base_price: row.base_price,
      discount_amount: row.discount_amount,
      tax_amount: row.tax_amount,
      total_amount: row.total_amount,
      promo_code: row.promo_code,
      status,
      created_at: row.created_at,
    })
  }
}
