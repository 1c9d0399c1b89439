//! [`SqliteStore`] — the SQLite implementation of [`BatchStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use batchtrace_core::{
  batch::{Batch, NewBatch},
  event::{Event, NewEvent},
  store::{BatchPage, BatchStore},
  trace::Trace,
};

use crate::{
  Error, Result,
  encode::{
    RawBatch, RawEvent, encode_date, encode_dt, encode_uuid,
    encode_verification,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A batchtrace store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Existence check for the referential constraint on event writes.
  /// No lock is needed: batches are never deleted, so a batch seen here
  /// still exists when the insert lands.
  async fn batch_exists(&self, batch_id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(batch_id);
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM batches WHERE batch_id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  /// Insert a fully-built [`Event`] into the `events` table.
  async fn insert_event(&self, event: &Event) -> Result<()> {
    let event_id_str     = encode_uuid(event.event_id);
    let batch_id_str     = encode_uuid(event.batch_id);
    let event_type_str   = event.event_type.label().to_owned();
    let description      = event.description.clone();
    let location         = event.location.clone();
    let timestamp_str    = encode_date(event.timestamp);
    let created_at_str   = encode_dt(event.created_at);
    let verification_str = event
      .verification
      .as_ref()
      .map(encode_verification)
      .transpose()?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (
             event_id, batch_id, event_type, description, location,
             timestamp, created_at, verification
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            event_id_str,
            batch_id_str,
            event_type_str,
            description,
            location,
            timestamp_str,
            created_at_str,
            verification_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch a batch's events without the existence check.
  async fn events_for(&self, batch_id: Uuid) -> Result<Vec<Event>> {
    let id_str = encode_uuid(batch_id);

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT event_id, batch_id, event_type, description, location,
                  timestamp, created_at, verification
           FROM events
           WHERE batch_id = ?1
           ORDER BY timestamp DESC, created_at DESC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawEvent {
              event_id:     row.get(0)?,
              batch_id:     row.get(1)?,
              event_type:   row.get(2)?,
              description:  row.get(3)?,
              location:     row.get(4)?,
              timestamp:    row.get(5)?,
              created_at:   row.get(6)?,
              verification: row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }
}

// ─── BatchStore impl ─────────────────────────────────────────────────────────

impl BatchStore for SqliteStore {
  type Error = Error;

  // ── Batches ───────────────────────────────────────────────────────────────

  async fn create_batch(&self, input: NewBatch) -> Result<Batch> {
    input.validate(Utc::now().date_naive()).map_err(Error::Core)?;

    let batch = Batch {
      batch_id:     Uuid::new_v4(),
      product_name: input.product_name,
      origin:       input.origin,
      harvest_date: input.harvest_date,
      created_at:   Utc::now(),
    };

    let id_str      = encode_uuid(batch.batch_id);
    let product     = batch.product_name.clone();
    let origin      = batch.origin.clone();
    let harvest_str = encode_date(batch.harvest_date);
    let at_str      = encode_dt(batch.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO batches (batch_id, product_name, origin, harvest_date, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, product, origin, harvest_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(batch)
  }

  async fn get_batch(&self, batch_id: Uuid) -> Result<Option<Batch>> {
    let id_str = encode_uuid(batch_id);

    let raw: Option<RawBatch> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT batch_id, product_name, origin, harvest_date, created_at
               FROM batches WHERE batch_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawBatch {
                  batch_id:     row.get(0)?,
                  product_name: row.get(1)?,
                  origin:       row.get(2)?,
                  harvest_date: row.get(3)?,
                  created_at:   row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawBatch::into_batch).transpose()
  }

  async fn list_batches(&self, page: BatchPage) -> Result<Vec<Batch>> {
    let limit_val  = page.limit.unwrap_or(100) as i64;
    let offset_val = page.offset.unwrap_or(0) as i64;

    let raws: Vec<RawBatch> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT batch_id, product_name, origin, harvest_date, created_at
           FROM batches
           ORDER BY created_at DESC
           LIMIT ?1 OFFSET ?2",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![limit_val, offset_val], |row| {
            Ok(RawBatch {
              batch_id:     row.get(0)?,
              product_name: row.get(1)?,
              origin:       row.get(2)?,
              harvest_date: row.get(3)?,
              created_at:   row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBatch::into_batch).collect()
  }

  // ── Events — append-only writes ───────────────────────────────────────────

  async fn add_event(&self, input: NewEvent) -> Result<Event> {
    input.validate(Utc::now().date_naive()).map_err(Error::Core)?;

    if !self.batch_exists(input.batch_id).await? {
      return Err(Error::Core(batchtrace_core::Error::BatchNotFound(
        input.batch_id,
      )));
    }

    let event = Event {
      event_id:     Uuid::new_v4(),
      batch_id:     input.batch_id,
      event_type:   input.event_type,
      description:  input.description,
      location:     input.location,
      timestamp:    input.timestamp,
      created_at:   Utc::now(),
      verification: input.verification,
    };

    self.insert_event(&event).await?;
    Ok(event)
  }

  async fn list_events(&self, batch_id: Uuid) -> Result<Vec<Event>> {
    if !self.batch_exists(batch_id).await? {
      return Err(Error::Core(batchtrace_core::Error::BatchNotFound(
        batch_id,
      )));
    }
    self.events_for(batch_id).await
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn build_trace(
    &self,
    batch_id: Uuid,
    base_url: &str,
  ) -> Result<Option<Trace>> {
    let batch = match self.get_batch(batch_id).await? {
      Some(b) => b,
      None => return Ok(None),
    };

    // An event appended after the batch fetch may or may not be included;
    // either way the snapshot is valid.
    let events = self.events_for(batch_id).await?;

    Ok(Some(Trace::assemble(batch, events, base_url)))
  }
}
