//! Handlers for `/favorites` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/favorites` | `?user=…[&email=…][&sort_by=…][&author=…][&category=…]` |
//! | `POST` | `/favorites/toggle` | Body: `{"user":"…","quoteId":"…"}` |
//!
//! The read path never fails outright: no identity yields the empty shape,
//! and a store failure on the mandatory path yields the empty shape with
//! its `error` indicator set. Only the like-count enrichment is optional —
//! on failure the counts default to zero and the response is still served.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use fdm_core::{
  rank::rank,
  shape::{FavoritesResponse, shape},
  store::{QuoteFilter, QuoteStore, SortOrder},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiError, store_call};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// External (auth-provider) user id; absent means anonymous.
  pub user:     Option<String>,
  /// Email claim forwarded from the provider, if any.
  pub email:    Option<String>,
  /// One of `newest` (default), `oldest`, `most_liked`, `less_liked`.
  pub sort_by:  Option<String>,
  pub author:   Option<String>,
  pub category: Option<String>,
}

/// `GET /favorites`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<FavoritesResponse>, ApiError>
where
  S: QuoteStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let sort = match params.sort_by.as_deref() {
    Some(s) => SortOrder::parse(s)
      .map_err(|e| ApiError::Validation(e.to_string()))?,
    None => SortOrder::default(),
  };
  let filter = QuoteFilter {
    author:   params.author,
    category: params.category,
  };

  // Anonymous callers get the empty shape, not an error.
  let external_id = match params.user.as_deref() {
    Some(id) if !id.is_empty() => id,
    _ => return Ok(Json(FavoritesResponse::empty(None))),
  };

  match favorites_for(
    store.as_ref(),
    external_id,
    params.email.as_deref(),
    &filter,
    sort,
  )
  .await
  {
    Ok(response) => Ok(Json(response)),
    // Mandatory-path failure: degrade to the empty shape with an
    // indicator rather than propagating past the boundary.
    Err(e) => {
      tracing::error!(error = %e, "favorites read degraded");
      Ok(Json(FavoritesResponse::empty(Some(e.to_string()))))
    }
  }
}

/// The sequential read pipeline: resolve identity, list favorites, expand
/// and filter quotes, enrich with like counts, rank, shape.
async fn favorites_for<S>(
  store: &S,
  external_id: &str,
  email: Option<&str>,
  filter: &QuoteFilter,
  sort: SortOrder,
) -> Result<FavoritesResponse, ApiError>
where
  S: QuoteStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = store_call(store.resolve_user(external_id, email)).await?;
  let favorites = store_call(store.list_favorites(user.user_id)).await?;

  let ids: Vec<Uuid> = favorites.iter().map(|f| f.quote_id).collect();
  let quotes = store_call(store.quotes_by_ids(&ids, filter)).await?;

  // Optional enrichment: a failed count fetch degrades to zeroes.
  let like_counts = match store_call(store.like_counts(&ids)).await {
    Ok(counts) => counts,
    Err(e) => {
      tracing::warn!(error = %e, "like-count fetch failed, defaulting to 0");
      Default::default()
    }
  };

  let ranked = rank(&favorites, quotes, &like_counts, sort);
  Ok(shape(ranked, &like_counts))
}

// ─── Toggle ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBody {
  /// External (auth-provider) user id.
  pub user:     Option<String>,
  pub email:    Option<String>,
  pub quote_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
  pub liked: bool,
}

/// `POST /favorites/toggle`
///
/// Unlike the read path, write failures surface as errors: 401 without an
/// identity, 400 for a missing or malformed quote id, 404 for an unknown
/// quote, 503 when the store is unreachable.
pub async fn toggle<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<ToggleBody>,
) -> Result<Json<ToggleResponse>, ApiError>
where
  S: QuoteStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let external_id = match body.user.as_deref() {
    Some(id) if !id.is_empty() => id,
    _ => return Err(ApiError::Unauthenticated),
  };
  let quote_id = body
    .quote_id
    .as_deref()
    .ok_or_else(|| ApiError::Validation("quoteId is required".into()))?;
  let quote_id = Uuid::parse_str(quote_id)
    .map_err(|e| ApiError::Validation(format!("malformed quoteId: {e}")))?;

  let user = store_call(store.resolve_user(external_id, body.email.as_deref()))
    .await?;
  let liked = store_call(store.toggle_favorite(user.user_id, quote_id))
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("quote {quote_id} not found")))?;

  Ok(Json(ToggleResponse { liked }))
}
