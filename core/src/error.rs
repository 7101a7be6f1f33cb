// core/src/error.rs
use serde::Serialize;
use thiserror::Error;

use crate::models::OrderStatus;

/// A single field-level problem found while validating input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Validation failed: {message}")]
  Validation { message: String, details: Vec<FieldError> },

  #[error("Not found: {0}")]
  NotFound(String),

  /// The input points at a row that does not exist (e.g. an unknown product id).
  #[error("Invalid reference: {0}")]
  InvalidReference(String),

  #[error("Order must contain at least one item")]
  EmptyOrder,

  #[error("Cannot change order status from '{from}' to '{to}'")]
  InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
  /// Validation failure for one field.
  pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
    let message = message.into();
    StoreError::Validation {
      message: format!("Invalid {}: {}", field, message),
      details: vec![FieldError::new(field, message)],
    }
  }

  /// Turns collected field errors into a `Validation` error, or `Ok(())` when there are none.
  pub fn check_fields(message: &str, details: Vec<FieldError>) -> StoreResult<()> {
    if details.is_empty() {
      Ok(())
    } else {
      Err(StoreError::Validation {
        message: message.to_string(),
        details,
      })
    }
  }

  /// True for failures caused by the caller's input rather than the store itself.
  pub fn is_client_error(&self) -> bool {
    !matches!(self, StoreError::Database(_) | StoreError::Migration(_))
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
