// slotbook/src/models/promo_code.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, BookingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
  Percentage,
  Flat,
}

impl DiscountType {
  pub fn as_str(&self) -> &'static str {
    match self {
      DiscountType::Percentage => "percentage",
      DiscountType::Flat => "flat",
    }
  }
}

impl std::str::FromStr for DiscountType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "percentage" => Ok(DiscountType::Percentage),
      "flat" => Ok(DiscountType::Flat),
      other => Err(format!("unknown discount type '{}'", other)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
  /// Always stored uppercase.
  pub code: String,
  pub discount_type: DiscountType,
  pub discount_value: Decimal,
  pub is_active: bool,
  pub valid_from: DateTime<Utc>,
  pub valid_until: DateTime<Utc>,
}

impl PromoCode {
  /// Active and `now` inside `[valid_from, valid_until]`, both ends inclusive.
  pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
    self.is_active && now >= self.valid_from && now <= self.valid_until
  }

  /// Fails with `Validation` when the percentage of `subtotal` is not representable.
  pub fn discount_for(&self, subtotal: Decimal) -> BookingResult<Decimal> {
    match self.discount_type {
      DiscountType::Percentage => subtotal
        .checked_mul(self.discount_value)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| BookingError::Validation("Invalid subtotal".to_string())),
      DiscountType::Flat => Ok(self.discount_value),
    }
  }
}

/// Case-insensitive lookup key for a promo code.
pub fn normalize_code(code: &str) -> String {
  code.trim().to_uppercase()
}
