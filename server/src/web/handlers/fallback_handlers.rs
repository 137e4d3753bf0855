// slotbook-server/src/web/handlers/fallback_handlers.rs

use actix_web::HttpResponse;
use serde_json::json;

use crate::errors::AppError;

pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok", "message": "Server is running" }))
}

pub async fn root_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "status": "ok",
    "message": "Slotbook API",
    "endpoints": {
      "health": "/health",
      "experiences": "/api/experiences",
      "bookings": "/api/bookings",
      "promo": "/api/promo",
    }
  }))
}

pub async fn not_found_handler() -> Result<HttpResponse, AppError> {
  Err(AppError::not_found("Resource not found"))
}
