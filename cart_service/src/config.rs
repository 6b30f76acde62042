// cart_service/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use actix_web::http::header::HeaderName;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_AUTH_USER_HEADER: &str = "X-User-ID";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// `None` runs the service on the in-memory cart store.
  pub database_url: Option<String>,
  pub product_service_url: String,
  pub product_lookup_timeout: Duration,
  /// Header carrying the caller identity, set by the upstream auth layer.
  pub auth_user_header: HeaderName,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
    let product_service_url = get_env("PRODUCT_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());

    let timeout_ms = get_env("PRODUCT_LOOKUP_TIMEOUT_MS")
      .unwrap_or_else(|_| "3000".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid PRODUCT_LOOKUP_TIMEOUT_MS: {}", e)))?;
    if timeout_ms == 0 {
      return Err(AppError::Config("PRODUCT_LOOKUP_TIMEOUT_MS must be greater than 0".to_string()));
    }

    let auth_user_header = get_env("AUTH_USER_HEADER").unwrap_or_else(|_| DEFAULT_AUTH_USER_HEADER.to_string());
    let auth_user_header = HeaderName::from_bytes(auth_user_header.trim().as_bytes())
      .map_err(|e| AppError::Config(format!("Invalid AUTH_USER_HEADER: {}", e)))?;

    tracing::info!(
      database = database_url.is_some(),
      product_service_url = %product_service_url,
      lookup_timeout_ms = timeout_ms,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      product_service_url,
      product_lookup_timeout: Duration::from_millis(timeout_ms),
      auth_user_header,
    })
  }
}
