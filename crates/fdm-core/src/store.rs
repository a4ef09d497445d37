//! The `QuoteStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `fdm-store-sqlite`).
//! Higher layers (`fdm-api`, `fdm-server`) depend on this abstraction, not
//! on any concrete backend.

use std::{collections::HashMap, future::Future};

use uuid::Uuid;

use crate::{favorite::Favorite, quote::QuoteRecord, user::User};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Optional equality filters applied at the store's join level.
///
/// Filtering happens inside the quote query, before ranking, so the facet
/// lists derived downstream reflect the filtered set and narrow together
/// with the filters.
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
  /// Exact match on the author display name.
  pub author:   Option<String>,
  /// Exact match on the category name.
  pub category: Option<String>,
}

impl QuoteFilter {
  pub fn is_empty(&self) -> bool {
    self.author.is_none() && self.category.is_none()
  }
}

/// The four supported orderings for a user's favorite list.
///
/// The wire form comes in as a raw query-string value and goes through
/// [`SortOrder::parse`], so the boundary can report an unknown value as a
/// validation error with the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  /// Requesting user's `liked_at`, most recent first.
  #[default]
  Newest,
  /// Requesting user's `liked_at`, oldest first.
  Oldest,
  /// Global like count across all users, highest first.
  MostLiked,
  /// Global like count across all users, lowest first.
  LessLiked,
}

impl SortOrder {
  /// Parse the wire form (`newest`, `oldest`, `most_liked`, `less_liked`).
  pub fn parse(s: &str) -> crate::Result<Self> {
    match s {
      "newest" => Ok(Self::Newest),
      "oldest" => Ok(Self::Oldest),
      "most_liked" => Ok(Self::MostLiked),
      "less_liked" => Ok(Self::LessLiked),
      other => Err(crate::Error::UnknownSortOrder(other.to_owned())),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a quote/favorite store backend.
///
/// Quotes, authors, and categories are read-only through this trait; the
/// favorite link records are the only mutable state. All methods return
/// `Send` futures so the trait can be used in multi-threaded async runtimes
/// (e.g. tokio with `axum`).
pub trait QuoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Identity ──────────────────────────────────────────────────────────

  /// Map an identity-provider subject id to an internal user, creating one
  /// on first sight.
  ///
  /// Lookup order: by `external_id`; then, if `email` is given, by email —
  /// a hit there rewrites that row's `external_id` in place (handles
  /// provider migration / re-issued subject ids); otherwise a new row is
  /// inserted. At most one write per call, and repeated calls for the same
  /// external id always yield the same row.
  fn resolve_user<'a>(
    &'a self,
    external_id: &'a str,
    email: Option<&'a str>,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  // ── Favorites ─────────────────────────────────────────────────────────

  /// All favorites recorded for `user_id`, in no particular order.
  /// An empty set is `Ok(vec![])`, never an error.
  fn list_favorites(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Favorite>, Self::Error>> + Send + '_;

  /// Flip the favorite state of `(user_id, quote_id)`.
  ///
  /// Returns `Some(true)` if the quote is now favorited, `Some(false)` if
  /// it is now un-favorited, and `None` if no such quote exists.
  fn toggle_favorite(
    &self,
    user_id: Uuid,
    quote_id: Uuid,
  ) -> impl Future<Output = Result<Option<bool>, Self::Error>> + Send + '_;

  /// Global like counts for the given quotes, across all users.
  ///
  /// Quotes with zero likes may be absent from the returned map; callers
  /// default missing entries to 0.
  fn like_counts<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<HashMap<Uuid, u64>, Self::Error>> + Send + 'a;

  // ── Quotes ────────────────────────────────────────────────────────────

  /// Expand quote ids into joined [`QuoteRecord`]s, applying `filter` at
  /// the join level.
  ///
  /// An empty `ids` slice short-circuits to `Ok(vec![])` without querying
  /// the store.
  fn quotes_by_ids<'a>(
    &'a self,
    ids: &'a [Uuid],
    filter: &'a QuoteFilter,
  ) -> impl Future<Output = Result<Vec<QuoteRecord>, Self::Error>> + Send + 'a;

  /// A random batch of quotes for anonymous browsing, same join and
  /// filters as [`QuoteStore::quotes_by_ids`].
  fn random_quotes<'a>(
    &'a self,
    limit: usize,
    filter: &'a QuoteFilter,
  ) -> impl Future<Output = Result<Vec<QuoteRecord>, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sort_order_parses_all_four_wire_forms() {
    assert_eq!(SortOrder::parse("newest").unwrap(), SortOrder::Newest);
    assert_eq!(SortOrder::parse("oldest").unwrap(), SortOrder::Oldest);
    assert_eq!(SortOrder::parse("most_liked").unwrap(), SortOrder::MostLiked);
    assert_eq!(SortOrder::parse("less_liked").unwrap(), SortOrder::LessLiked);
  }

  #[test]
  fn sort_order_rejects_unknown_values() {
    let err = SortOrder::parse("spiciest").unwrap_err();
    assert!(matches!(err, crate::Error::UnknownSortOrder(ref v) if v == "spiciest"));
  }

  #[test]
  fn default_sort_is_newest() {
    assert_eq!(SortOrder::default(), SortOrder::Newest);
  }
}
