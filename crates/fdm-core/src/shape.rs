//! Shaping of a ranked quote list into the client response.
//!
//! Strips the per-user `liked_at` used only for sorting and derives the
//! filter facets (distinct author/category labels) from the current result
//! set. Because facets are computed after filters are applied, they narrow
//! together with the filters — a client cannot discover values hidden by
//! its own filter from these lists.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quote::QuoteRecord;

/// One quote as the client sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapedQuote {
  pub id:       Uuid,
  pub text:     String,
  pub author:   String,
  /// Global like count, derived at read time — never stored.
  pub likes:    u64,
  /// Vestigial; no dislike data exists. Kept as a constant 0 for client
  /// compatibility.
  pub dislikes: u64,
  pub category: String,
}

/// The full favorites (or quote-browse) response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
  pub quotes:               Vec<ShapedQuote>,
  pub available_authors:    Vec<String>,
  pub available_categories: Vec<String>,
  /// Set when the response was degraded by a store failure; the shape is
  /// still well-formed (empty lists), never an uncaught error.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:                Option<String>,
}

impl FavoritesResponse {
  /// The well-formed empty shape, with an optional degradation indicator.
  pub fn empty(error: Option<String>) -> Self {
    Self { error, ..Self::default() }
  }
}

/// Normalize ranked records into the response shape and derive the facets.
pub fn shape(
  ranked: Vec<QuoteRecord>,
  like_counts: &HashMap<Uuid, u64>,
) -> FavoritesResponse {
  let mut authors: BTreeSet<String> = BTreeSet::new();
  let mut categories: BTreeSet<String> = BTreeSet::new();

  let quotes: Vec<ShapedQuote> = ranked
    .into_iter()
    .map(|q| {
      authors.insert(q.author.clone());
      // The empty-string "no category" label is not a usable facet.
      if !q.category.is_empty() {
        categories.insert(q.category.clone());
      }
      ShapedQuote {
        id:       q.quote_id,
        text:     q.text,
        author:   q.author,
        likes:    like_counts.get(&q.quote_id).copied().unwrap_or(0),
        dislikes: 0,
        category: q.category,
      }
    })
    .collect();

  FavoritesResponse {
    quotes,
    available_authors: authors.into_iter().collect(),
    available_categories: categories.into_iter().collect(),
    error: None,
  }
}
