//! Handlers for `/batches` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/batches` | Optional `?limit=&offset=` |
//! | `POST` | `/batches` | Body: [`batchtrace_core::batch::NewBatch`] |
//! | `GET`  | `/batches/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use batchtrace_core::{
  batch::{Batch, NewBatch},
  store::{BatchPage, BatchStore},
  trace::trace_url,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

/// `GET /batches[?limit=<n>&offset=<n>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Batch>>, ApiError>
where
  S: BatchStore,
{
  let batches = state
    .store
    .list_batches(BatchPage {
      limit:  params.limit,
      offset: params.offset,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(batches))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// Response for `POST /batches`: the created batch plus the derived trace
/// reference, so a label or QR code can be printed straight away.
#[derive(Debug, Serialize)]
pub struct BatchCreated {
  pub batch_id:        Uuid,
  pub trace_reference: String,
  pub product_name:    String,
  pub origin:          String,
  pub harvest_date:    NaiveDate,
  pub created_at:      DateTime<Utc>,
}

/// `POST /batches` — returns 201 + [`BatchCreated`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewBatch>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BatchStore,
{
  let batch = state
    .store
    .create_batch(body)
    .await
    .map_err(ApiError::from_store)?;

  let trace_reference = trace_url(&state.base_url, batch.batch_id);

  Ok((
    StatusCode::CREATED,
    Json(BatchCreated {
      batch_id: batch.batch_id,
      trace_reference,
      product_name: batch.product_name,
      origin: batch.origin,
      harvest_date: batch.harvest_date,
      created_at: batch.created_at,
    }),
  ))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /batches/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Batch>, ApiError>
where
  S: BatchStore,
{
  let batch = state
    .store
    .get_batch(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("batch {id} not found")))?;
  Ok(Json(batch))
}
