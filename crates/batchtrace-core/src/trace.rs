//! Trace assembly — the derived chain-of-custody view.
//!
//! A trace is never stored. It is recomputed on every read by merging a
//! batch with its events, so it can never go stale.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{batch::Batch, event::Event};

// ─── Reference derivation ────────────────────────────────────────────────────

/// Derive the shareable trace URL for a batch.
///
/// Deterministic: the same `batch_id` always yields the same reference for a
/// fixed `base_url`, and distinct batches never collide, so the string can
/// be printed on a label or QR code before any event exists and remains
/// valid indefinitely. Rendering the QR itself is a client concern; callers
/// should use error-correction level Q or better so a moderately damaged
/// print still scans.
pub fn trace_url(base_url: &str, batch_id: Uuid) -> String {
  format!("{}/trace/{batch_id}", base_url.trim_end_matches('/'))
}

// ─── Trace ───────────────────────────────────────────────────────────────────

/// The computed read model for a batch — never stored, always derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
  pub batch_id:        Uuid,
  pub product_name:    String,
  pub origin:          String,
  pub harvest_date:    NaiveDate,
  pub created_at:      DateTime<Utc>,
  /// All events for the batch, most recent lifecycle stage first.
  pub events:          Vec<Event>,
  pub trace_reference: String,
}

impl Trace {
  /// Merge `batch` with its `events` into the trace view.
  ///
  /// Events are sorted by `timestamp` descending; ties are broken by
  /// `created_at` descending (more recently recorded wins), so the result
  /// is identical regardless of the order the events were retrieved or
  /// inserted. Performs no writes; an empty `events` is a valid state for
  /// a freshly created batch.
  pub fn assemble(batch: Batch, mut events: Vec<Event>, base_url: &str) -> Self {
    events
      .sort_by(|a, b| (b.timestamp, b.created_at).cmp(&(a.timestamp, a.created_at)));
    let trace_reference = trace_url(base_url, batch.batch_id);
    Self {
      batch_id: batch.batch_id,
      product_name: batch.product_name,
      origin: batch.origin,
      harvest_date: batch.harvest_date,
      created_at: batch.created_at,
      events,
      trace_reference,
    }
  }
}
