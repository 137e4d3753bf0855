// slotbook-server/src/web/handlers/booking_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use slotbook::CreateBookingRequest;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::envelope::respond;

/// `POST /api/bookings`. Validation, capacity and reference allocation all
/// happen in the engine; this handler only translates.
#[instrument(
  name = "handler::create_booking",
  skip(app_state, payload),
  fields(slot_id = ?payload.slot_id, quantity = ?payload.quantity)
)]
pub async fn create_booking_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, AppError> {
  let confirmation = app_state.engine.create_booking(payload.into_inner()).await?;
  info!(
    booking_id = %confirmation.booking_id,
    reference_id = %confirmation.reference_id,
    "Booking created."
  );
  Ok(respond(StatusCode::CREATED, confirmation))
}
