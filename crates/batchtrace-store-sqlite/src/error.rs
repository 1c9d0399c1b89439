//! Error type for `batchtrace-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Domain failure: validation or an unresolved batch reference.
  #[error("core error: {0}")]
  Core(#[from] batchtrace_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

/// Collapse backend plumbing into [`batchtrace_core::Error::Storage`] while
/// preserving the domain classification, so boundary layers can map errors
/// without depending on this crate.
impl From<Error> for batchtrace_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(core) => core,
      other => Self::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
