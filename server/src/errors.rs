// slotbook-server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use slotbook::{BookingError, ErrorKind};
use thiserror::Error;

use crate::web::envelope::Envelope;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Booking(#[from] BookingError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      AppError::Booking(e) => e.kind(),
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => ErrorKind::Internal,
    }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    AppError::Booking(BookingError::Validation(message.into()))
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    AppError::Booking(BookingError::NotFound(message.into()))
  }
}

// Handlers that use `?` on anyhow::Result land here.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    let err = match err.downcast::<BookingError>() {
      Ok(booking_err) => return AppError::Booking(booking_err),
      Err(other) => other,
    };
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
  match kind {
    ErrorKind::Validation | ErrorKind::SlotUnavailable | ErrorKind::InvalidPromoCode => StatusCode::BAD_REQUEST,
    ErrorKind::NotFound => StatusCode::NOT_FOUND,
    ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    status_for(self.kind())
  }

  fn error_response(&self) -> HttpResponse {
    let kind = self.kind();
    let (message, details) = match self {
      AppError::Booking(e) => (e.public_message(), e.details()),
      _ => ("An unexpected error occurred".to_string(), None),
    };

    if kind == ErrorKind::Internal {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::info!(code = %kind, message = %message, "Request rejected");
    }

    HttpResponse::build(self.status_code()).json(Envelope::failure(kind.as_str(), message, details))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
