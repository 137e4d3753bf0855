// slotbook-server/src/web/envelope.rs

//! JSON envelopes shared by every endpoint.
//!
//! Success: `{ "success": true, "data": ... }`
//! Failure: `{ "success": false, "error": { "code", "message", "details"? } }`

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
  pub code: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<Value>,
}

impl<T: Serialize> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self {
      success: true,
      data: Some(data),
      error: None,
    }
  }
}

impl Envelope<()> {
  pub fn failure(code: &str, message: impl Into<String>, details: Option<Value>) -> Self {
    Self {
      success: false,
      data: None,
      error: Some(ErrorBody {
        code: code.to_string(),
        message: message.into(),
        details,
      }),
    }
  }
}

pub fn respond<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
  HttpResponse::build(status).json(Envelope::ok(data))
}
