//! Error types for `batchtrace-core`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("batch not found: {0}")]
  BatchNotFound(Uuid),

  #[error("{field} must not be empty")]
  EmptyField { field: &'static str },

  #[error("{field}: {value} is in the future")]
  FutureDate {
    field: &'static str,
    value: NaiveDate,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Backend failure surfaced through the [`crate::store::BatchStore`]
  /// boundary; never produced by this crate itself.
  #[error("storage error: {0}")]
  Storage(String),
}

impl Error {
  /// `true` for errors the caller can fix by correcting input.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::EmptyField { .. } | Self::FutureDate { .. })
  }

  /// The offending field name, for validation errors.
  pub fn field(&self) -> Option<&'static str> {
    match self {
      Self::EmptyField { field } | Self::FutureDate { field, .. } => {
        Some(*field)
      }
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
