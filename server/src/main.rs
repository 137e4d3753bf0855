// slotbook-server/src/main.rs

use actix_web::middleware::from_fn;
use actix_web::{web as actix_data, App, HttpServer};
use slotbook::BookingStore;
use slotbook_server::config::{AppConfig, LogFormat};
use slotbook_server::db::{self, PgStore};
use slotbook_server::state::AppState;
use slotbook_server::web::{configure_app, cors, not_found_handler};
use slotbook_server::telemetry;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // LOG_FORMAT is read ahead of the full config so that config errors are logged in the right shape.
  let log_format = std::env::var("LOG_FORMAT")
    .ok()
    .and_then(|v| v.parse::<LogFormat>().ok())
    .unwrap_or(LogFormat::Pretty);
  telemetry::init_tracing(log_format);

  tracing::info!("Starting slotbook server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let db_pool = match db::connect(&app_config).await {
    Ok(pool) => pool,
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      return Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string()));
    }
  };

  if let Err(e) = db::migrate(&db_pool).await {
    tracing::error!(error = %e, "Failed to migrate the database.");
    return Err(std::io::Error::other(e.to_string()));
  }

  if app_config.seed_db {
    if let Err(e) = db::seed::seed(&db_pool, &app_config.app_base_url).await {
      tracing::error!(error = %e, "Failed to seed database.");
      return Err(std::io::Error::other(e.to_string()));
    }
  }

  let store: Arc<dyn BookingStore> = Arc::new(PgStore::new(db_pool.clone()));
  let app_state = actix_data::Data::new(AppState::new(store, app_config.clone()));

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  let served = HttpServer::new(move || {
    App::new()
      .configure(configure_app(app_state.clone()))
      .default_service(actix_data::to(not_found_handler))
      .wrap(from_fn(cors::cors))
      .wrap(tracing_actix_web::TracingLogger::default())
  })
  .bind(&server_address)?
  .run()
  .await;

  tracing::info!("Server stopped, closing database pool.");
  db_pool.close().await;
  served
}
