// cart_service/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use cart_core::CartError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Cart(#[from] CartError),

  /// Request bodies that could not be decoded at all.
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Cart(CartError::from(err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Cart(CartError::AuthenticationRequired) => StatusCode::UNAUTHORIZED,
      AppError::Cart(CartError::Validation(_)) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Cart(CartError::NotFound(_)) => StatusCode::NOT_FOUND,
      AppError::Cart(CartError::Unexpected { .. })
      | AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Client errors carry their message; server errors are logged in full and answered generically.
    let message = match self {
      AppError::Cart(CartError::Validation(m)) | AppError::Cart(CartError::NotFound(m)) | AppError::Validation(m) => {
        tracing::warn!(status = status.as_u16(), application_error = %self, "Rejecting request");
        m.clone()
      }
      AppError::Cart(CartError::AuthenticationRequired) => {
        tracing::warn!(status = status.as_u16(), "Rejecting unauthenticated request");
        self.to_string()
      }
      _ => {
        tracing::error!(application_error = ?self, "Responding with error");
        "An internal error occurred".to_string()
      }
    };
    HttpResponse::build(status).json(json!({ "error": message }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
