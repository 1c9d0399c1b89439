//! Server wiring for batchtrace: configuration and router construction.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use batchtrace_api::AppState;
use batchtrace_core::store::BatchStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Public URL prefix embedded in every trace reference. Once labels are
  /// printed this must not change, or the printed references go dead.
  pub base_url:   String,
  pub store_path: PathBuf,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full application router: the batchtrace API plus request
/// tracing.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: BatchStore + Send + Sync + 'static,
{
  batchtrace_api::api_router(AppState::new(store, config.base_url.as_str()))
    .layer(TraceLayer::new_for_http())
}
