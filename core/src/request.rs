// slotbook/src/request.rs

//! The booking-creation contract: what a caller submits and what it gets back.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingStatus};

/// Names as they appear on the wire, in presence-check order.
pub const REQUIRED_FIELDS: [&str; 8] = [
  "experienceId",
  "slotId",
  "date",
  "time",
  "quantity",
  "customerName",
  "customerEmail",
  "agreedToTerms",
];

/// Largest amount a booking can carry, 99999999.99: the `NUMERIC(10, 2)` bound of the bookings table.
// 9_999_999_999 split into the low and mid 32-bit words.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A checkout submission. Every field is optional at the type level so that
/// an incomplete submission reaches the presence check instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
  pub experience_id: Option<String>,
  pub slot_id: Option<String>,
  pub date: Option<String>,
  pub time: Option<String>,
  pub quantity: Option<i64>,
  pub customer_name: Option<String>,
  pub customer_email: Option<String>,
  pub promo_code: Option<String>,
  pub agreed_to_terms: Option<bool>,
  pub base_price: Option<Decimal>,
  pub discount_amount: Option<Decimal>,
  pub tax_amount: Option<Decimal>,
  pub total_amount: Option<Decimal>,
}

fn blank(value: &Option<String>) -> bool {
  value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl CreateBookingRequest {
  /// Wire names of required fields that are absent, blank, or (for
  /// `agreedToTerms`) not `true`.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    let checks = [
      blank(&self.experience_id),
      blank(&self.slot_id),
      blank(&self.date),
      blank(&self.time),
      self.quantity.is_none(),
      blank(&self.customer_name),
      blank(&self.customer_email),
      self.agreed_to_terms != Some(true),
    ];
    REQUIRED_FIELDS
      .iter()
      .zip(checks)
      .filter_map(|(name, is_missing)| is_missing.then_some(*name))
      .collect()
  }

  pub fn check_required_fields(&self) -> BookingResult<()> {
    let missing = self.missing_fields();
    if missing.is_empty() {
      return Ok(());
    }
    Err(BookingError::MissingFields {
      required: REQUIRED_FIELDS.to_vec(),
      missing,
    })
  }

  pub fn check_email_format(&self) -> BookingResult<()> {
    match self.customer_email.as_deref() {
      Some(email) if is_valid_email(email) => Ok(()),
      _ => Err(BookingError::Validation("Invalid email format".to_string())),
    }
  }

  /// Quantity as the store's integer type. Rejects values below 1 and values
  /// no slot could ever hold.
  pub fn checked_quantity(&self) -> BookingResult<i32> {
    match self.quantity {
      Some(q) if q >= 1 => i32::try_from(q).map_err(|_| BookingError::Validation("Quantity is too large".to_string())),
      _ => Err(BookingError::Validation("Quantity must be at least 1".to_string())),
    }
  }

  /// Each supplied financial field must lie in `0..=MAX_AMOUNT`.
  pub fn check_amounts(&self) -> BookingResult<()> {
    let amounts = [
      ("basePrice", self.base_price),
      ("discountAmount", self.discount_amount),
      ("taxAmount", self.tax_amount),
      ("totalAmount", self.total_amount),
    ];
    for (name, amount) in amounts {
      if let Some(value) = amount {
        if value < Decimal::ZERO || value > MAX_AMOUNT {
          return Err(BookingError::Validation(format!("{} is out of range", name)));
        }
      }
    }
    Ok(())
  }

  /// Uppercased promo code, `None` when absent or blank.
  pub fn normalized_promo_code(&self) -> Option<String> {
    self
      .promo_code
      .as_deref()
      .map(crate::models::normalize_code)
      .filter(|c| !c.is_empty())
  }
}

pub fn is_valid_email(email: &str) -> bool {
  EMAIL_SHAPE.is_match(email)
}

/// An identifier the caller sent that does not name anything we could have
/// stored resolves the same way as an unknown one.
pub fn parse_id(raw: Option<&str>, what: &str) -> BookingResult<Uuid> {
  raw
    .and_then(|r| Uuid::parse_str(r.trim()).ok())
    .ok_or_else(|| BookingError::NotFound(format!("{} not found", what)))
}

/// Successful checkout, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
  pub booking_id: Uuid,
  pub reference_id: String,
  pub status: BookingStatus,
}

impl From<&Booking> for BookingConfirmation {
  fn from(booking: &Booking) -> Self {
    Self {
      booking_id: booking.id,
      reference_id: booking.reference_id.clone(),
      status: booking.status,
    }
  }
}
