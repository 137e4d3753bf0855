// slotbook/src/error.rs
use anyhow::Error as AnyhowError;
use serde_json::{json, Value};
use thiserror::Error;

/// Wire-level classification of a failed booking-related operation.
///
/// The string form (`as_str`) is what callers see in the `code` field of the
/// error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  Validation,
  NotFound,
  SlotUnavailable,
  InvalidPromoCode,
  Internal,
}

impl ErrorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ErrorKind::Validation => "VALIDATION_ERROR",
      ErrorKind::NotFound => "NOT_FOUND",
      ErrorKind::SlotUnavailable => "SLOT_UNAVAILABLE",
      ErrorKind::InvalidPromoCode => "INVALID_PROMO_CODE",
      ErrorKind::Internal => "INTERNAL_ERROR",
    }
  }
}

impl std::fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
pub enum BookingError {
  /// Required fields absent or blank. `missing` names the offending fields.
  #[error("Missing required fields: {}", .missing.join(", "))]
  MissingFields {
    required: Vec<&'static str>,
    missing: Vec<&'static str>,
  },

  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  #[error("The selected time slot is no longer available")]
  SlotUnavailable { requested: i32, available: i32 },

  #[error("{0}")]
  InvalidPromoCode(String),

  /// Persistence or infrastructure fault. The transaction it happened in was rolled back.
  #[error("Storage operation failed: {source}")]
  Storage {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal booking error: {0}")]
  Internal(String),
}

impl BookingError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      BookingError::MissingFields { .. } | BookingError::Validation(_) => ErrorKind::Validation,
      BookingError::NotFound(_) => ErrorKind::NotFound,
      BookingError::SlotUnavailable { .. } => ErrorKind::SlotUnavailable,
      BookingError::InvalidPromoCode(_) => ErrorKind::InvalidPromoCode,
      BookingError::Storage { .. } | BookingError::Internal(_) => ErrorKind::Internal,
    }
  }

  /// Structured diagnostics for the error envelope, if the kind carries any.
  pub fn details(&self) -> Option<Value> {
    match self {
      BookingError::MissingFields { required, missing } => Some(json!({
        "required": required,
        "missing": missing,
      })),
      BookingError::SlotUnavailable { requested, available } => Some(json!({
        "requested": requested,
        "available": available,
      })),
      _ => None,
    }
  }

  /// Message safe to hand to a caller. Internal faults never leak their cause.
  pub fn public_message(&self) -> String {
    match self.kind() {
      ErrorKind::Internal => "An unexpected error occurred".to_string(),
      _ => self.to_string(),
    }
  }

  pub fn storage(err: impl Into<AnyhowError>) -> Self {
    BookingError::Storage { source: err.into() }
  }
}

impl From<AnyhowError> for BookingError {
  fn from(err: AnyhowError) -> Self {
    // A BookingError that travelled through anyhow keeps its kind only if we
    // can take it back out; otherwise it is a storage fault.
    match err.downcast::<BookingError>() {
      Ok(booking_err) => booking_err,
      Err(other) => BookingError::Storage { source: other },
    }
  }
}

pub type BookingResult<T, E = BookingError> = std::result::Result<T, E>;
