//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and calendar dates as ISO 8601
//! (`YYYY-MM-DD`, which sorts lexicographically in date order). The optional
//! verification claim is stored as compact JSON. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use batchtrace_core::{
  batch::Batch,
  event::{Event, EventType, Verification},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Verification ────────────────────────────────────────────────────────────

pub fn encode_verification(v: &Verification) -> Result<String> {
  Ok(serde_json::to_string(v)?)
}

pub fn decode_verification(s: &str) -> Result<Verification> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `batches` row.
pub struct RawBatch {
  pub batch_id:     String,
  pub product_name: String,
  pub origin:       String,
  pub harvest_date: String,
  pub created_at:   String,
}

impl RawBatch {
  pub fn into_batch(self) -> Result<Batch> {
    Ok(Batch {
      batch_id:     decode_uuid(&self.batch_id)?,
      product_name: self.product_name,
      origin:       self.origin,
      harvest_date: decode_date(&self.harvest_date)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `events` row.
pub struct RawEvent {
  pub event_id:     String,
  pub batch_id:     String,
  pub event_type:   String,
  pub description:  String,
  pub location:     String,
  pub timestamp:    String,
  pub created_at:   String,
  pub verification: Option<String>,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    let verification = self
      .verification
      .as_deref()
      .map(decode_verification)
      .transpose()?;

    Ok(Event {
      event_id: decode_uuid(&self.event_id)?,
      batch_id: decode_uuid(&self.batch_id)?,
      event_type: EventType::from(self.event_type),
      description: self.description,
      location: self.location,
      timestamp: decode_date(&self.timestamp)?,
      created_at: decode_dt(&self.created_at)?,
      verification,
    })
  }
}
