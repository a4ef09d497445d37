//! Server assembly for the Free Daily Motivation backend: configuration
//! plus the top-level router. The binary in `main.rs` stays thin so the
//! full HTTP surface can be exercised in-process by the tests below.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use fdm_core::store::QuoteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level router: the JSON API under `/api`, with request
/// tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: QuoteStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", fdm_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
