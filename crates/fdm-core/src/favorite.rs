//! Favorite — the link record between one user and one quote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's like of one quote, as read back for that user.
///
/// At most one favorite exists per (user, quote) pair; the store enforces
/// this with a uniqueness constraint. `liked_at` drives the newest/oldest
/// sort orders; a favorite with no resolvable timestamp sorts as if liked
/// at the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
  pub quote_id: Uuid,
  pub liked_at: Option<DateTime<Utc>>,
}
