//! The `BatchStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `batchtrace-store-sqlite`). Higher layers (`batchtrace-api`,
//! `batchtrace-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  batch::{Batch, NewBatch},
  event::{Event, NewEvent},
  trace::Trace,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Pagination window for [`BatchStore::list_batches`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchPage {
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a batchtrace storage backend.
///
/// Batches and events are strictly append-only: no method ever updates or
/// deletes a stored record. Failed writes create nothing.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). The associated
/// error converts into [`crate::Error`] so boundary layers can classify
/// validation, not-found, and backend failures without naming the backend.
pub trait BatchStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Batches ───────────────────────────────────────────────────────────

  /// Validate `input` and persist a new batch, all-or-nothing.
  ///
  /// The store allocates `batch_id` and stamps `created_at`. Concurrent
  /// calls are independent; the random identifier scheme makes allocation
  /// collision-free without coordination.
  fn create_batch(
    &self,
    input: NewBatch,
  ) -> impl Future<Output = Result<Batch, Self::Error>> + Send + '_;

  /// Retrieve a batch by id. Returns `None` if not found.
  fn get_batch(
    &self,
    batch_id: Uuid,
  ) -> impl Future<Output = Result<Option<Batch>, Self::Error>> + Send + '_;

  /// List batches, newest first, within the given pagination window.
  fn list_batches(
    &self,
    page: BatchPage,
  ) -> impl Future<Output = Result<Vec<Batch>, Self::Error>> + Send + '_;

  // ── Events — append-only writes ───────────────────────────────────────

  /// Validate `input` and append a new event for `input.batch_id`.
  ///
  /// Fails with the batch-not-found error if the referenced batch does not
  /// exist; the existence check needs no lock because batches are never
  /// deleted. A failed call creates no record.
  fn add_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  /// Return all events for a batch. An existing batch with no events
  /// yields an empty vec; an unknown batch yields the batch-not-found
  /// error.
  fn list_events(
    &self,
    batch_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Assemble the [`Trace`] for a batch — the computed, chronologically
  /// ordered read model. Returns `None` if the batch does not exist.
  ///
  /// Read-only; may interleave with writers. An event appended between the
  /// batch fetch and the event fetch may or may not appear — either result
  /// is a valid snapshot.
  fn build_trace<'a>(
    &'a self,
    batch_id: Uuid,
    base_url: &'a str,
  ) -> impl Future<Output = Result<Option<Trace>, Self::Error>> + Send + 'a;
}
