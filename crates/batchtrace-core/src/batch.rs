//! Batch — the producer-registered unit of product.
//!
//! A batch holds only fixed origin/harvest metadata. Everything that happens
//! to it afterwards is recorded as events; the "trace" view is assembled on
//! read by merging the batch with its events.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A registered unit of product. Once written, no field is ever updated;
/// corrections are recorded as new events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
  pub batch_id:     Uuid,
  pub product_name: String,
  pub origin:       String,
  pub harvest_date: NaiveDate,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::BatchStore::create_batch`].
/// `batch_id` and `created_at` are always set by the store; they are not
/// accepted from callers.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBatch {
  pub product_name: String,
  pub origin:       String,
  pub harvest_date: NaiveDate,
}

impl NewBatch {
  /// Check field constraints against `today` (the store passes the current
  /// date so the rule stays deterministic under test).
  ///
  /// All-or-nothing: the first violated constraint is returned and nothing
  /// is persisted.
  pub fn validate(&self, today: NaiveDate) -> Result<()> {
    require_non_empty("product_name", &self.product_name)?;
    require_non_empty("origin", &self.origin)?;
    if self.harvest_date > today {
      return Err(Error::FutureDate {
        field: "harvest_date",
        value: self.harvest_date,
      });
    }
    Ok(())
  }
}

/// Whitespace-only counts as empty.
pub(crate) fn require_non_empty(
  field: &'static str,
  value: &str,
) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::EmptyField { field });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::NewBatch;
  use crate::Error;

  fn day(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn valid() -> NewBatch {
    NewBatch {
      product_name: "Organic Apples".into(),
      origin:       "Washington State".into(),
      harvest_date: day("2024-09-01"),
    }
  }

  #[test]
  fn valid_input_passes() {
    assert!(valid().validate(day("2024-09-10")).is_ok());
  }

  #[test]
  fn harvest_on_current_date_passes() {
    assert!(valid().validate(day("2024-09-01")).is_ok());
  }

  #[test]
  fn empty_product_name_rejected() {
    let mut input = valid();
    input.product_name = "   ".into();
    let err = input.validate(day("2024-09-10")).unwrap_err();
    assert!(matches!(err, Error::EmptyField { field: "product_name" }));
  }

  #[test]
  fn empty_origin_rejected() {
    let mut input = valid();
    input.origin = String::new();
    let err = input.validate(day("2024-09-10")).unwrap_err();
    assert!(matches!(err, Error::EmptyField { field: "origin" }));
  }

  #[test]
  fn future_harvest_date_rejected() {
    let input = valid();
    // one day before the harvest date
    let err = input.validate(day("2024-08-31")).unwrap_err();
    assert!(matches!(err, Error::FutureDate { field: "harvest_date", .. }));
    assert!(err.is_validation());
    assert_eq!(err.field(), Some("harvest_date"));
  }
}
