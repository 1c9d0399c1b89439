//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("{message}")]
  Validation {
    field:   &'static str,
    message: String,
  },

  #[error("store error: {0}")]
  Store(String),
}

impl ApiError {
  /// Classify a store failure surfaced through the
  /// [`batchtrace_core::store::BatchStore`] boundary.
  pub fn from_store<E: Into<batchtrace_core::Error>>(err: E) -> Self {
    let err = err.into();
    match err {
      batchtrace_core::Error::BatchNotFound(id) => {
        Self::NotFound(format!("batch {id} not found"))
      }
      e if e.is_validation() => Self::Validation {
        field:   e.field().unwrap_or("input"),
        message: e.to_string(),
      },
      e => Self::Store(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(message) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
          .into_response()
      }
      ApiError::Validation { field, message } => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": message, "field": field })),
      )
        .into_response(),
      ApiError::Store(message) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
      )
        .into_response(),
    }
  }
}
