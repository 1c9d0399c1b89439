//! Handler for the `/trace/:id` endpoint — the dereference target of every
//! `trace_reference`.

use axum::{
  Json,
  extract::{Path, State},
};
use batchtrace_core::{store::BatchStore, trace::Trace};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `GET /trace/:id`
///
/// Returns the full chain-of-custody view: batch fields, events ordered
/// most recent first, and the stable trace reference. A batch with no
/// events yields a trace with an empty event list, not an error.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Trace>, ApiError>
where
  S: BatchStore,
{
  let trace = state
    .store
    .build_trace(id, &state.base_url)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("batch {id} not found")))?;
  Ok(Json(trace))
}
