//! Router tests against an in-memory `SqliteStore`.

use std::sync::Arc;

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode, header},
};
use batchtrace_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::{AppState, api_router};

const BASE: &str = "https://trace.example";

async fn app() -> Router {
  let store = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  api_router(AppState::new(Arc::new(store), BASE))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn get(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn apples() -> Value {
  json!({
    "product_name": "Organic Apples",
    "origin": "Washington State",
    "harvest_date": "2024-09-01",
  })
}

async fn create_batch(app: &Router) -> Value {
  let response = app
    .clone()
    .oneshot(post_json("/batches", apples()))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CREATED);
  json_body(response).await
}

// ─── Batches ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_batch_returns_reference_containing_id() {
  let app = app().await;
  let created = create_batch(&app).await;

  let batch_id = created["batch_id"].as_str().unwrap();
  let reference = created["trace_reference"].as_str().unwrap();
  assert_eq!(reference, format!("{BASE}/trace/{batch_id}"));

  // input echoed back
  assert_eq!(created["product_name"], "Organic Apples");
  assert_eq!(created["origin"], "Washington State");
  assert_eq!(created["harvest_date"], "2024-09-01");
}

#[tokio::test]
async fn create_batch_empty_field_is_422_naming_the_field() {
  let app = app().await;

  let mut body = apples();
  body["origin"] = json!("   ");
  let response = app
    .clone()
    .oneshot(post_json("/batches", body))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let err = json_body(response).await;
  assert_eq!(err["field"], "origin");

  // nothing was created
  let response = app.oneshot(get("/batches")).await.unwrap();
  let listed = json_body(response).await;
  assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_batch_future_harvest_date_is_422() {
  let app = app().await;

  let mut body = apples();
  body["harvest_date"] = json!(
    (chrono::Utc::now() + chrono::Duration::days(1))
      .date_naive()
      .to_string()
  );
  let response = app.oneshot(post_json("/batches", body)).await.unwrap();
  assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let err = json_body(response).await;
  assert_eq!(err["field"], "harvest_date");
}

#[tokio::test]
async fn get_unknown_batch_is_404() {
  let app = app().await;
  let response = app
    .oneshot(get(&format!("/batches/{}", Uuid::new_v4())))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_batches_returns_created_batches() {
  let app = app().await;
  create_batch(&app).await;
  create_batch(&app).await;

  let response = app.oneshot(get("/batches?limit=10")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let listed = json_body(response).await;
  assert_eq!(listed.as_array().unwrap().len(), 2);
}

// ─── Events ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_event_to_unknown_batch_is_404() {
  let app = app().await;

  let body = json!({
    "batch_id": Uuid::new_v4(),
    "event_type": "Harvest",
    "description": "Picked",
    "location": "Orchard 4",
    "timestamp": "2024-09-01",
  });
  let response = app.oneshot(post_json("/events", body)).await.unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_event_returns_stored_record() {
  let app = app().await;
  let created = create_batch(&app).await;
  let batch_id = created["batch_id"].as_str().unwrap().to_owned();

  let body = json!({
    "batch_id": batch_id,
    "event_type": "Harvest",
    "description": "Picked",
    "location": "Orchard 4",
    "timestamp": "2024-09-01",
  });
  let response = app
    .clone()
    .oneshot(post_json("/events", body))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CREATED);

  let event = json_body(response).await;
  assert!(event["event_id"].as_str().is_some());
  assert!(event["created_at"].as_str().is_some());
  assert_eq!(event["batch_id"], batch_id.as_str());
  assert_eq!(event["event_type"], "Harvest");
}

#[tokio::test]
async fn list_events_for_unknown_batch_is_404() {
  let app = app().await;
  let response = app
    .oneshot(get(&format!("/events?batch_id={}", Uuid::new_v4())))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ─── Trace ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn trace_for_unknown_batch_is_404() {
  let app = app().await;
  let response = app
    .oneshot(get(&format!("/trace/{}", Uuid::new_v4())))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fresh_batch_trace_has_empty_events() {
  let app = app().await;
  let created = create_batch(&app).await;
  let batch_id = created["batch_id"].as_str().unwrap().to_owned();

  let response = app
    .oneshot(get(&format!("/trace/{batch_id}")))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let trace = json_body(response).await;
  assert_eq!(trace["batch_id"], batch_id.as_str());
  assert_eq!(trace["events"].as_array().unwrap().len(), 0);
  assert_eq!(trace["trace_reference"], created["trace_reference"]);
}

#[tokio::test]
async fn trace_orders_events_most_recent_first() {
  let app = app().await;
  let created = create_batch(&app).await;
  let batch_id = created["batch_id"].as_str().unwrap().to_owned();

  for (event_type, timestamp) in
    [("Harvest", "2024-09-01"), ("Packaging", "2024-09-05")]
  {
    let body = json!({
      "batch_id": batch_id,
      "event_type": event_type,
      "description": "stage recorded",
      "location": "Plant 2",
      "timestamp": timestamp,
    });
    let response = app
      .clone()
      .oneshot(post_json("/events", body))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
  }

  let response = app
    .oneshot(get(&format!("/trace/{batch_id}")))
    .await
    .unwrap();
  let trace = json_body(response).await;

  let types: Vec<_> = trace["events"]
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["event_type"].as_str().unwrap().to_owned())
    .collect();
  assert_eq!(types, vec!["Packaging", "Harvest"]);
}
