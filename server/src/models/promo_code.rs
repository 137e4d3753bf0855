// slotbook-server/src/models/promo_code.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use slotbook::{BookingError, DiscountType, PromoCode};
use sqlx::FromRow;

pub const PROMO_CODE_COLUMNS: &str = "code, discount_type, discount_value, is_active, valid_from, valid_until";

#[derive(Debug, Clone, FromRow)]
pub struct PromoCodeRow {
  pub code: String,
  pub discount_type: String,
  pub discount_value: Decimal,
  pub is_active: bool,
  pub valid_from: DateTime<Utc>,
  pub valid_until: DateTime<Utc>,
}

impl TryFrom<PromoCodeRow> for PromoCode {
  type Error = BookingError;

  fn try_from(row: PromoCodeRow) -> Result<Self, Self::Error> {
    let discount_type = row
      .discount_type
      .parse::<DiscountType>()
      .map_err(|e| BookingError::Internal(format!("promo code {}: {}", row.code, e)))?;
    Ok(PromoCode {
      code: row.code,
      discount_type,
      discount_value: row.discount_value,
      is_active: row.is_active,
      valid_from: row.valid_from,
      valid_until: row.valid_until,
    })
  }
}
