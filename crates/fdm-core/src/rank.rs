//! Ranking of a user's favorite quotes.
//!
//! A full in-memory sort over the (already filtered) result set. No
//! pagination is pushed down to the store; at the data volumes this
//! application holds (hundreds of quotes) a memory-resident sort is fine,
//! and that is a documented scaling boundary rather than a bug.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{favorite::Favorite, quote::QuoteRecord, store::SortOrder};

/// Order `quotes` according to `sort`.
///
/// `favorites` supplies the requesting user's per-quote `liked_at`
/// timestamps (newest/oldest orders); a favorite with no timestamp sorts as
/// the Unix epoch. `like_counts` supplies the global like counts
/// (most/less-liked orders); quotes absent from the map count as 0. Ties
/// keep their input order — the sort is stable.
pub fn rank(
  favorites: &[Favorite],
  quotes: Vec<QuoteRecord>,
  like_counts: &HashMap<Uuid, u64>,
  sort: SortOrder,
) -> Vec<QuoteRecord> {
  let liked_at: HashMap<Uuid, DateTime<Utc>> = favorites
    .iter()
    .map(|f| (f.quote_id, f.liked_at.unwrap_or(DateTime::UNIX_EPOCH)))
    .collect();

  let mut ranked = quotes;
  match sort {
    SortOrder::Newest => {
      ranked.sort_by_key(|q| {
        std::cmp::Reverse(liked_at.get(&q.quote_id).copied().unwrap_or(DateTime::UNIX_EPOCH))
      });
    }
    SortOrder::Oldest => {
      ranked.sort_by_key(|q| {
        liked_at.get(&q.quote_id).copied().unwrap_or(DateTime::UNIX_EPOCH)
      });
    }
    SortOrder::MostLiked => {
      ranked.sort_by_key(|q| {
        std::cmp::Reverse(like_counts.get(&q.quote_id).copied().unwrap_or(0))
      });
    }
    SortOrder::LessLiked => {
      ranked.sort_by_key(|q| like_counts.get(&q.quote_id).copied().unwrap_or(0));
    }
  }
  ranked
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn record(id: Uuid, text: &str) -> QuoteRecord {
    QuoteRecord {
      quote_id: id,
      text:     text.to_owned(),
      author:   "Seneca".to_owned(),
      category: "stoicism".to_owned(),
    }
  }

  fn liked(id: Uuid, at: i64) -> Favorite {
    Favorite {
      quote_id: id,
      liked_at: Some(Utc.timestamp_opt(at, 0).unwrap()),
    }
  }

  #[test]
  fn newest_puts_most_recent_like_first() {
    let (q1, q2) = (Uuid::new_v4(), Uuid::new_v4());
    let favorites = vec![liked(q1, 100), liked(q2, 200)];
    let quotes = vec![record(q1, "one"), record(q2, "two")];

    let ranked = rank(&favorites, quotes, &HashMap::new(), SortOrder::Newest);
    let ids: Vec<_> = ranked.iter().map(|q| q.quote_id).collect();
    assert_eq!(ids, vec![q2, q1]);
  }

  #[test]
  fn oldest_puts_earliest_like_first() {
    let (q1, q2) = (Uuid::new_v4(), Uuid::new_v4());
    let favorites = vec![liked(q1, 100), liked(q2, 200)];
    let quotes = vec![record(q2, "two"), record(q1, "one")];

    let ranked = rank(&favorites, quotes, &HashMap::new(), SortOrder::Oldest);
    let ids: Vec<_> = ranked.iter().map(|q| q.quote_id).collect();
    assert_eq!(ids, vec![q1, q2]);
  }

  #[test]
  fn missing_timestamp_sorts_as_epoch() {
    let (q1, q2) = (Uuid::new_v4(), Uuid::new_v4());
    let favorites = vec![
      Favorite { quote_id: q1, liked_at: None },
      liked(q2, 50),
    ];
    let quotes = vec![record(q1, "undated"), record(q2, "dated")];

    let newest = rank(
      &favorites,
      quotes.clone(),
      &HashMap::new(),
      SortOrder::Newest,
    );
    assert_eq!(newest[0].quote_id, q2);

    let oldest = rank(&favorites, quotes, &HashMap::new(), SortOrder::Oldest);
    assert_eq!(oldest[0].quote_id, q1);
  }

  #[test]
  fn most_liked_uses_global_counts() {
    let (q1, q2) = (Uuid::new_v4(), Uuid::new_v4());
    let counts = HashMap::from([(q1, 5), (q2, 2)]);
    let quotes = vec![record(q2, "two"), record(q1, "one")];

    let ranked = rank(&[], quotes, &counts, SortOrder::MostLiked);
    let ids: Vec<_> = ranked.iter().map(|q| q.quote_id).collect();
    assert_eq!(ids, vec![q1, q2]);
  }

  #[test]
  fn less_liked_reverses_and_defaults_missing_to_zero() {
    let (q1, q2, q3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    // q3 has no entry in the count map at all.
    let counts = HashMap::from([(q1, 5), (q2, 2)]);
    let quotes = vec![record(q1, "one"), record(q2, "two"), record(q3, "three")];

    let ranked = rank(&[], quotes, &counts, SortOrder::LessLiked);
    let ids: Vec<_> = ranked.iter().map(|q| q.quote_id).collect();
    assert_eq!(ids, vec![q3, q2, q1]);
  }

  #[test]
  fn ties_keep_input_order() {
    let (q1, q2) = (Uuid::new_v4(), Uuid::new_v4());
    let counts = HashMap::from([(q1, 3), (q2, 3)]);
    let quotes = vec![record(q1, "first"), record(q2, "second")];

    let ranked = rank(&[], quotes, &counts, SortOrder::MostLiked);
    let ids: Vec<_> = ranked.iter().map(|q| q.quote_id).collect();
    assert_eq!(ids, vec![q1, q2]);
  }
}
