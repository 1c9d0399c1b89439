//! JSON REST API for batchtrace.
//!
//! Exposes an axum [`Router`] backed by any
//! [`batchtrace_core::store::BatchStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility. All authoritative validation and event
//! ordering lives in the core and store; handlers only translate.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", batchtrace_api::api_router(state.clone()))
//! ```

pub mod batches;
pub mod error;
pub mod events;
pub mod trace;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use batchtrace_core::store::BatchStore;

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store:    Arc<S>,
  /// Public URL prefix embedded in every `trace_reference`, e.g.
  /// `https://trace.example`. Must stay fixed for printed references to
  /// remain valid.
  pub base_url: Arc<str>,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, base_url: impl Into<Arc<str>>) -> Self {
    Self {
      store,
      base_url: base_url.into(),
    }
  }
}

// Manual impl: the store sits behind an `Arc`, so no `S: Clone` bound.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      base_url: Arc::clone(&self.base_url),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: BatchStore + Send + Sync + 'static,
{
  Router::new()
    // Batches
    .route("/batches", get(batches::list::<S>).post(batches::create::<S>))
    .route("/batches/{id}", get(batches::get_one::<S>))
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    // Trace
    .route("/trace/{id}", get(trace::get_one::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests;
