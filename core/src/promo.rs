// slotbook/src/promo.rs

//! Promo-code evaluation. Stateless: a lookup plus arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::{BookingError, BookingResult};
use crate::models::{normalize_code, DiscountType, PromoCode};
use crate::store::BookingStore;

/// A redeemable code applied to a subtotal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoQuote {
  pub code: String,
  pub discount_type: DiscountType,
  pub discount_value: Decimal,
  pub discount_amount: Decimal,
}

/// Looks `code` up (case-insensitive) and checks it is active and inside its
/// validity window at `now`.
pub async fn find_redeemable(store: &dyn BookingStore, code: &str, now: DateTime<Utc>) -> BookingResult<PromoCode> {
  let normalized = normalize_code(code);
  let promo = store
    .find_promo_code(&normalized)
    .await?
    .ok_or_else(|| BookingError::InvalidPromoCode("Invalid promo code".to_string()))?;
  check_redeemable(&promo, now)?;
  Ok(promo)
}

pub fn check_redeemable(promo: &PromoCode, now: DateTime<Utc>) -> BookingResult<()> {
  if !promo.is_active {
    return Err(BookingError::InvalidPromoCode(
      "Promo code is no longer active".to_string(),
    ));
  }
  if !promo.is_redeemable_at(now) {
    return Err(BookingError::InvalidPromoCode(
      "Promo code has expired or is not yet valid".to_string(),
    ));
  }
  Ok(())
}

pub fn quote(promo: &PromoCode, subtotal: Decimal) -> BookingResult<PromoQuote> {
  Ok(PromoQuote {
    code: promo.code.clone(),
    discount_type: promo.discount_type,
    discount_value: promo.discount_value,
    discount_amount: promo.discount_for(subtotal)?,
  })
}

#[instrument(name = "promo::evaluate", skip(store, code), fields(code = %code))]
pub async fn evaluate_at(
  store: &dyn BookingStore,
  code: &str,
  subtotal: Decimal,
  now: DateTime<Utc>,
) -> BookingResult<PromoQuote> {
  let promo = find_redeemable(store, code, now).await?;
  let applied = quote(&promo, subtotal)?;
  info!(discount_amount = %applied.discount_amount, "Promo code accepted.");
  Ok(applied)
}

pub async fn evaluate(store: &dyn BookingStore, code: &str, subtotal: Decimal) -> BookingResult<PromoQuote> {
  evaluate_at(store, code, subtotal, Utc::now()).await
}
