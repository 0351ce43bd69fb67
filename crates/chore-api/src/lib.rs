//! JSON REST API for Chore.
//!
//! Exposes an axum [`Router`] backed by any [`TaskStore`] +
//! [`ActionLedger`] implementation. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", chore_api::api_router(store.clone()))
//! ```

pub mod envelope;
pub mod error;
pub mod stats;
pub mod tasks;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json,
  Router,
  routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use chore_core::store::{ActionLedger, TaskStore};

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CHORE_`-prefixed environment variables. Every field has a default,
/// so the server also starts with no configuration at all.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("chore.db") }

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TaskStore + ActionLedger + 'static,
{
  Router::new()
    // Tasks
    .route("/tasks", get(tasks::list::<S>).post(tasks::create::<S>))
    .route(
      "/tasks/{id}",
      patch(tasks::update_one::<S>).delete(tasks::delete_one::<S>),
    )
    .route("/tasks/bulk-delete", post(tasks::bulk_delete::<S>))
    .route("/tasks/bulk-complete", post(tasks::bulk_complete::<S>))
    // Statistics
    .route("/statistics", get(stats::overview::<S>))
    .route("/statistics/actions", get(stats::actions::<S>))
    .with_state(store)
}

/// Root application router: health probe, versioned API, request traces.
pub fn app_router<S>(store: Arc<S>) -> Router<()>
where
  S: TaskStore + ActionLedger + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api/v1", api_router(store))
    .layer(TraceLayer::new_for_http())
}

/// `GET /health`
async fn health() -> Json<serde_json::Value> {
  Json(json!({ "status": "healthy" }))
}

// ─── Integration tests ───────────────────────────────────────────────────────
