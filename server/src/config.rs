// slotbook-server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

impl std::str::FromStr for LogFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!(
        "Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'",
        other
      ))),
    }
  }
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
  Any,
  List(Vec<String>),
}

impl AllowedOrigins {
  /// Comma separated list; `*` anywhere in it allows every origin.
  pub fn parse(raw: &str) -> Self {
    let origins: Vec<String> = raw
      .split(',')
      .map(|o| o.trim().trim_end_matches('/').to_string())
      .filter(|o| !o.is_empty())
      .collect();
    if origins.iter().any(|o| o == "*") {
      AllowedOrigins::Any
    } else {
      AllowedOrigins::List(origins)
    }
  }

  /// Value for `Access-Control-Allow-Origin` given the request's `Origin`, if any.
  pub fn allow(&self, origin: Option<&str>) -> Option<String> {
    match (self, origin) {
      (AllowedOrigins::Any, Some(o)) => Some(o.to_string()),
      (AllowedOrigins::Any, None) => Some("*".to_string()),
      (AllowedOrigins::List(list), Some(o)) => list.iter().find(|allowed| allowed.as_str() == o).cloned(),
      (AllowedOrigins::List(_), None) => None,
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,
  /// Public base URL of this server; seeded image URLs hang off it.
  pub app_base_url: String,
  pub allowed_origins: AllowedOrigins,
  pub seed_db: bool,
  pub promo_revalidation: bool,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };
    let parse_bool = |var_name: &str, default: &str| {
      get_env(var_name)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid {} value: {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "3000".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let database_max_connections = get_env("DATABASE_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "10".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{}", server_port));
    let allowed_origins =
      AllowedOrigins::parse(&get_env("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string()));

    let seed_db = parse_bool("SEED_DB", "false")?;
    let promo_revalidation = parse_bool("PROMO_REVALIDATION", "true")?;
    let log_format = get_env("LOG_FORMAT")
      .unwrap_or_else(|_| "pretty".to_string())
      .parse::<LogFormat>()?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      app_base_url,
      allowed_origins,
      seed_db,
      promo_revalidation,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
