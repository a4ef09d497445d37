//! Handler for `GET /quotes` — anonymous quote browsing.
//!
//! Serves a random batch of quotes with the same join, filters, and response
//! shape as the favorites list, so the client's filter UI works identically
//! on both.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use fdm_core::{
  shape::{FavoritesResponse, shape},
  store::{QuoteFilter, QuoteStore},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, store_call};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub limit:    Option<usize>,
  pub author:   Option<String>,
  pub category: Option<String>,
}

/// `GET /quotes[?limit=…][&author=…][&category=…]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<FavoritesResponse>, ApiError>
where
  S: QuoteStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
  let filter = QuoteFilter {
    author:   params.author,
    category: params.category,
  };

  let quotes = match store_call(store.random_quotes(limit, &filter)).await {
    Ok(quotes) => quotes,
    Err(e) => {
      tracing::error!(error = %e, "quote browse degraded");
      return Ok(Json(FavoritesResponse::empty(Some(e.to_string()))));
    }
  };

  let ids: Vec<Uuid> = quotes.iter().map(|q| q.quote_id).collect();
  let like_counts = match store_call(store.like_counts(&ids)).await {
    Ok(counts) => counts,
    Err(e) => {
      tracing::warn!(error = %e, "like-count fetch failed, defaulting to 0");
      Default::default()
    }
  };

  // Random order is the ranking here; shaping alone suffices.
  Ok(Json(shape(quotes, &like_counts)))
}
