// slotbook/src/checkout/steps.rs

//! The stages of a booking checkout and the standard wiring of them.
//!
//! Validation stages run first and never touch the store. The only stage
//! that mutates anything is `reserve_and_record`, which hands the whole
//! capacity-check / decrement / reference / insert sequence to the store as
//! one atomic unit.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use crate::checkout::context::{CheckoutContext, CheckoutState};
use crate::checkout::pipeline::{CheckoutPipeline, StepControl};
use crate::error::{BookingError, BookingResult};
use crate::models::NewBooking;
use crate::promo;
use crate::request::parse_id;

pub const CHECK_REQUIRED_FIELDS: &str = "check_required_fields";
pub const CHECK_EMAIL_FORMAT: &str = "check_email_format";
pub const CHECK_QUANTITY: &str = "check_quantity";
pub const CHECK_AMOUNTS: &str = "check_amounts";
pub const REVALIDATE_PROMO_CODE: &str = "revalidate_promo_code";
pub const RESERVE_AND_RECORD: &str = "reserve_and_record";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPolicy {
  /// Re-check a submitted promo code (exists, active, in window) right before
  /// reserving. The discount amount itself is taken as submitted either way.
  pub revalidate_promo: bool,
}

impl Default for CheckoutPolicy {
  fn default() -> Self {
    Self { revalidate_promo: true }
  }
}

pub fn standard_pipeline(policy: CheckoutPolicy) -> CheckoutPipeline {
  let mut p = CheckoutPipeline::new(&[
    (CHECK_REQUIRED_FIELDS, false),
    (CHECK_EMAIL_FORMAT, false),
    (CHECK_QUANTITY, false),
    (CHECK_AMOUNTS, false),
    (REVALIDATE_PROMO_CODE, true),
    (RESERVE_AND_RECORD, false),
  ]);

  p.on(CHECK_REQUIRED_FIELDS, check_required_fields);
  p.on(CHECK_EMAIL_FORMAT, check_email_format);
  p.on(CHECK_QUANTITY, check_quantity);
  p.on(CHECK_AMOUNTS, check_amounts);
  if policy.revalidate_promo {
    p.on(REVALIDATE_PROMO_CODE, revalidate_promo_code);
    p.set_skip_condition(
      REVALIDATE_PROMO_CODE,
      Some(Arc::new(|state: &CheckoutState| state.request.normalized_promo_code().is_none())),
    );
  }
  p.on(RESERVE_AND_RECORD, reserve_and_record);
  p
}

async fn check_required_fields(ctx: CheckoutContext) -> BookingResult<StepControl> {
  ctx.read().request.check_required_fields()?;
  Ok(StepControl::Continue)
}

async fn check_email_format(ctx: CheckoutContext) -> BookingResult<StepControl> {
  ctx.read().request.check_email_format()?;
  Ok(StepControl::Continue)
}

async fn check_quantity(ctx: CheckoutContext) -> BookingResult<StepControl> {
  let quantity = ctx.read().request.checked_quantity()?;
  ctx.write().quantity = Some(quantity);
  Ok(StepControl::Continue)
}

async fn check_amounts(ctx: CheckoutContext) -> BookingResult<StepControl> {
  ctx.read().request.check_amounts()?;
  Ok(StepControl::Continue)
}

async fn revalidate_promo_code(ctx: CheckoutContext) -> BookingResult<StepControl> {
  let (store, code, now) = {
    let state = ctx.read();
    (state.store.clone(), state.request.normalized_promo_code(), state.started_at)
  };
  if let Some(code) = code {
    promo::find_redeemable(store.as_ref(), &code, now).await?;
    debug!(promo_code = %code, "Promo code still redeemable.");
  }
  Ok(StepControl::Continue)
}

async fn reserve_and_record(ctx: CheckoutContext) -> BookingResult<StepControl> {
  let (store, references, new_booking) = {
    let state = ctx.read();
    let req = &state.request;
    let quantity = state
      .quantity
      .ok_or_else(|| BookingError::Internal("reservation reached before quantity check".to_string()))?;
    let new_booking = NewBooking {
      slot_id: parse_id(req.slot_id.as_deref(), "Slot")?,
      experience_id: parse_id(req.experience_id.as_deref(), "Experience")?,
      customer_name: req.customer_name.as_deref().unwrap_or_default().trim().to_string(),
      customer_email: req.customer_email.as_deref().unwrap_or_default().trim().to_string(),
      quantity,
      base_price: req.base_price.unwrap_or(Decimal::ZERO),
      discount_amount: req.discount_amount.unwrap_or(Decimal::ZERO),
      tax_amount: req.tax_amount.unwrap_or(Decimal::ZERO),
      total_amount: req.total_amount.unwrap_or(Decimal::ZERO),
      promo_code: req.normalized_promo_code(),
    };
    (state.store.clone(), state.references.clone(), new_booking)
  };

  let booking = store.reserve_and_record(new_booking, &references).await?;
  info!(
    booking_id = %booking.id,
    reference_id = %booking.reference_id,
    slot_id = %booking.slot_id,
    quantity = booking.quantity,
    "Booking confirmed."
  );
  ctx.write().booking = Some(booking);
  Ok(StepControl::Continue)
}
