// slotbook-server/src/web/routes.rs

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{booking_handlers, experience_handlers, fallback_handlers, promo_handlers};

pub use fallback_handlers::not_found_handler;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  let message = match &err {
    JsonPayloadError::ContentType => "Request body must be JSON".to_string(),
    JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
    other => format!("Invalid request body: {}", other),
  };
  AppError::validation(message).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::validation(format!("Invalid query string: {}", err)).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
  AppError::validation(format!("Invalid path: {}", err)).into()
}

/// Shared state, extractor error handling, and every route. Unknown routes
/// are left to the app's default service (`not_found_handler`).
pub fn configure_app(app_state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
  move |cfg: &mut web::ServiceConfig| {
    cfg
      .app_data(app_state)
      .app_data(web::JsonConfig::default().limit(64 * 1024).error_handler(json_error_handler))
      .app_data(web::QueryConfig::default().error_handler(query_error_handler))
      .app_data(web::PathConfig::default().error_handler(path_error_handler))
      .route("/", web::get().to(fallback_handlers::root_handler))
      .route("/health", web::get().to(fallback_handlers::health_check_handler))
      .service(
        web::scope("/api")
          .service(
            web::scope("/experiences")
              .route("", web::get().to(experience_handlers::list_experiences_handler))
              .route("/{experience_id}", web::get().to(experience_handlers::get_experience_handler)),
          )
          .service(web::scope("/bookings").route("", web::post().to(booking_handlers::create_booking_handler)))
          .service(web::scope("/promo").route("/validate", web::post().to(promo_handlers::validate_promo_handler))),
      );
  }
}
