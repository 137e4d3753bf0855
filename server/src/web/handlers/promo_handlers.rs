// slotbook-server/src/web/handlers/promo_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use slotbook::promo;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::envelope::respond;

#[derive(Deserialize, Debug)]
pub struct ValidatePromoRequest {
  pub code: Option<String>,
  pub subtotal: Option<Decimal>,
}

#[instrument(name = "handler::validate_promo", skip(app_state, payload))]
pub async fn validate_promo_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<ValidatePromoRequest>,
) -> Result<HttpResponse, AppError> {
  let ValidatePromoRequest { code, subtotal } = payload.into_inner();
  let code = match code.as_deref().map(str::trim) {
    Some(c) if !c.is_empty() => c.to_string(),
    _ => return Err(AppError::validation("Promo code is required")),
  };
  let applied = promo::evaluate(app_state.store.as_ref(), &code, subtotal.unwrap_or(Decimal::ZERO)).await?;
  Ok(respond(StatusCode::OK, applied))
}
