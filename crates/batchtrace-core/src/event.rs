//! Event types — the fundamental unit of the batchtrace store.
//!
//! An event is an immutable, dated record of a lifecycle stage applied to a
//! batch. Events are never updated or deleted; a correction is simply a
//! newer event.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, batch::require_non_empty, error::Error};

// ─── EventType ───────────────────────────────────────────────────────────────

/// A lifecycle stage label. The set is open-ended: unknown labels round-trip
/// through [`EventType::Custom`] untouched, so new stages need no schema
/// migration.
///
/// Serialised as a plain string (the label itself), not a tagged enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
  Harvest,
  Processing,
  QualityCheck,
  Packaging,
  Storage,
  Transportation,
  Distribution,
  Retail,
  Other,
  /// Escape hatch for stages outside the known taxonomy.
  Custom(String),
}

impl EventType {
  /// The canonical label, e.g. `"Quality Check"`.
  pub fn label(&self) -> &str {
    match self {
      Self::Harvest => "Harvest",
      Self::Processing => "Processing",
      Self::QualityCheck => "Quality Check",
      Self::Packaging => "Packaging",
      Self::Storage => "Storage",
      Self::Transportation => "Transportation",
      Self::Distribution => "Distribution",
      Self::Retail => "Retail",
      Self::Other => "Other",
      Self::Custom(label) => label,
    }
  }
}

impl From<String> for EventType {
  fn from(s: String) -> Self {
    match s.as_str() {
      "Harvest" => Self::Harvest,
      "Processing" => Self::Processing,
      "Quality Check" => Self::QualityCheck,
      "Packaging" => Self::Packaging,
      "Storage" => Self::Storage,
      "Transportation" => Self::Transportation,
      "Distribution" => Self::Distribution,
      "Retail" => Self::Retail,
      "Other" => Self::Other,
      _ => Self::Custom(s),
    }
  }
}

impl From<EventType> for String {
  fn from(t: EventType) -> Self { t.label().to_owned() }
}

impl std::fmt::Display for EventType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

// ─── Verification ────────────────────────────────────────────────────────────

/// Opaque verification claim supplied by an external collaborator (e.g. a
/// ledger anchoring service). The core stores and echoes it; it never
/// computes or checks the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
  pub verified:     bool,
  /// Locator for the external record backing the claim, if any
  /// (e.g. a ledger transaction URL).
  pub external_ref: Option<String>,
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// An immutable lifecycle record for a batch. Once written, no field is ever
/// updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub event_id:     Uuid,
  pub batch_id:     Uuid,
  pub event_type:   EventType,
  pub description:  String,
  pub location:     String,
  /// The date the real-world event occurred — distinct from when it was
  /// recorded.
  pub timestamp:    NaiveDate,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:   DateTime<Utc>,
  pub verification: Option<Verification>,
}

// ─── NewEvent ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::BatchStore::add_event`].
/// `event_id` and `created_at` are always set by the store; they are not
/// accepted from callers.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
  pub batch_id:     Uuid,
  pub event_type:   EventType,
  pub description:  String,
  pub location:     String,
  pub timestamp:    NaiveDate,
  #[serde(default)]
  pub verification: Option<Verification>,
}

impl NewEvent {
  /// Convenience constructor with `verification` unset.
  pub fn new(
    batch_id: Uuid,
    event_type: EventType,
    description: impl Into<String>,
    location: impl Into<String>,
    timestamp: NaiveDate,
  ) -> Self {
    Self {
      batch_id,
      event_type,
      description: description.into(),
      location: location.into(),
      timestamp,
      verification: None,
    }
  }

  /// Check field constraints against `today`. The referential constraint
  /// ("does `batch_id` exist") is enforced by the store, not here.
  pub fn validate(&self, today: NaiveDate) -> Result<()> {
    require_non_empty("event_type", self.event_type.label())?;
    require_non_empty("description", &self.description)?;
    require_non_empty("location", &self.location)?;
    if self.timestamp > today {
      return Err(Error::FutureDate {
        field: "timestamp",
        value: self.timestamp,
      });
    }
    Ok(())
  }
}
