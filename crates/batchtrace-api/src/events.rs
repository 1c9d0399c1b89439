//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events` | `?batch_id` required; 404 if the batch is unknown |
//! | `POST` | `/events` | Body: [`batchtrace_core::event::NewEvent`]; returns 201 + stored event |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use batchtrace_core::{
  event::{Event, NewEvent},
  store::BatchStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Required: the batch whose events to return.
  pub batch_id: Uuid,
}

/// `GET /events?batch_id=<id>`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Event>>, ApiError>
where
  S: BatchStore,
{
  let events = state
    .store
    .list_events(params.batch_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(events))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /events` — the body carries `batch_id`; returns 201 + the stored
/// [`Event`] with its generated id and `created_at`.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewEvent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BatchStore,
{
  let event = state
    .store
    .add_event(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(event)))
}
