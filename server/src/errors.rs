// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use storefront::{FieldError, StoreError};

#[derive(Debug, Error)]
pub enum AppError {
  /// Request shape problems caught before any store is called.
  #[error("Validation Error: {message}")]
  Validation { message: String, details: Vec<FieldError> },

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error(transparent)]
  Store(#[from] StoreError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn validation(message: impl Into<String>) -> Self {
    AppError::Validation {
      message: message.into(),
      details: Vec::new(),
    }
  }

  pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
    let message = message.into();
    AppError::Validation {
      message: format!("Invalid {}: {}", field, message),
      details: vec![FieldError::new(field, message)],
    }
  }
}

impl From<sqlx::Error> for AppError {
  fn from(err: sqlx::Error) -> Self {
    AppError::Store(StoreError::Database(err))
  }
}

fn client_error_body(message: &str, details: &[FieldError]) -> serde_json::Value {
  if details.is_empty() {
    json!({ "error": message })
  } else {
    json!({ "error": message, "details": details })
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation { .. } => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::Store(store_err) => match store_err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Validation { .. }
        | StoreError::InvalidReference(_)
        | StoreError::EmptyOrder
        | StoreError::InvalidStatusTransition { .. } => StatusCode::BAD_REQUEST,
        StoreError::Database(_) | StoreError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      // Full detail goes to the log only.
      tracing::error!(application_error = %self, "Responding with error");
      return HttpResponse::build(status).json(json!({ "error": "An internal error occurred" }));
    }

    tracing::warn!(application_error = %self, status = status.as_u16(), "Rejecting request");
    let body = match self {
      AppError::Validation { message, details } => client_error_body(message, details),
      AppError::Store(StoreError::Validation { message, details }) => client_error_body(message, details),
      AppError::NotFound(m) | AppError::Store(StoreError::NotFound(m)) => json!({ "error": m }),
      AppError::Store(StoreError::InvalidReference(m)) => json!({ "error": m }),
      other => json!({ "error": other.to_string() }),
    };
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
