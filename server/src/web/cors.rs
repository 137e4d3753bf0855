// slotbook-server/src/web/cors.rs

//! Browser cross-origin headers, driven by `AppConfig::allowed_origins`.
//! Preflight requests are answered here and never reach a handler.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderMap, HeaderValue};
use actix_web::http::Method;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse};

use crate::state::AppState;

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

fn apply(headers: &mut HeaderMap, origin: &str) {
  if let Ok(value) = HeaderValue::from_str(origin) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
  }
}

pub async fn cors(
  req: ServiceRequest,
  next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
  let origin = req
    .headers()
    .get(header::ORIGIN)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned);
  let allowed = req
    .app_data::<web::Data<AppState>>()
    .and_then(|state| state.config.allowed_origins.allow(origin.as_deref()));

  if req.method() == Method::OPTIONS && origin.is_some() {
    let mut response = HttpResponse::NoContent().finish();
    if let Some(allowed) = &allowed {
      let headers = response.headers_mut();
      apply(headers, allowed);
      headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
      headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    }
    return Ok(req.into_response(response).map_into_right_body());
  }

  let mut res = next.call(req).await?;
  if let Some(allowed) = &allowed {
    apply(res.headers_mut(), allowed);
  }
  Ok(res.map_into_left_body())
}
