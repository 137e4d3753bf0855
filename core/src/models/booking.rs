// slotbook/src/models/booking.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
  Confirmed,
}

impl BookingStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      BookingStatus::Confirmed => "confirmed",
    }
  }
}

impl std::str::FromStr for BookingStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "confirmed" => Ok(BookingStatus::Confirmed),
      other => Err(format!("unknown booking status '{}'", other)),
    }
  }
}

/// Everything the engine hands to the store for one reservation.
/// The store adds the id, reference code, status and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
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
}

/// A confirmed reservation. Append-only: never updated or deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
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
  pub status: BookingStatus,
  pub created_at: DateTime<Utc>,
}

impl Booking {
  pub fn confirmed(id: Uuid, reference_id: String, new_booking: NewBooking, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      reference_id,
      experience_id: new_booking.experience_id,
      slot_id: new_booking.slot_id,
      customer_name: new_booking.customer_name,
      customer_email: new_booking.customer_email,
      quantity: new_booking.quantity,
      base_price: new_booking.base_price,
      discount_amount: new_booking.discount_amount,
      tax_amount: new_booking.tax_amount,
      total_amount: new_booking.total_amount,
      promo_code: new_booking.promo_code,
      status: BookingStatus::Confirmed,
      created_at,
    }
  }
}
