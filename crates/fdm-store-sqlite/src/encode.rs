//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use fdm_core::{favorite::Favorite, quote::QuoteRecord, user::User};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:     String,
  pub external_id: String,
  pub email:       Option<String>,
  pub created_at:  String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:     decode_uuid(&self.user_id)?,
      external_id: self.external_id,
      email:       self.email,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read from a `favorites` row, scoped to one user.
pub struct RawFavorite {
  pub quote_id:   String,
  pub created_at: Option<String>,
}

impl RawFavorite {
  pub fn into_favorite(self) -> Result<Favorite> {
    Ok(Favorite {
      quote_id: decode_uuid(&self.quote_id)?,
      liked_at: self.created_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// Raw strings read from a `quotes` row left-joined with `authors` and
/// `categories`. Fallbacks are applied here, at the store boundary: a
/// missing author name becomes `"Unknown Author"`, a missing category the
/// empty string.
pub struct RawQuoteRecord {
  pub quote_id: String,
  pub text:     String,
  pub author:   Option<String>,
  pub category: Option<String>,
}

impl RawQuoteRecord {
  pub fn into_record(self) -> Result<QuoteRecord> {
    Ok(QuoteRecord {
      quote_id: decode_uuid(&self.quote_id)?,
      text:     self.text,
      author:   self
        .author
        .unwrap_or_else(|| fdm_core::quote::UNKNOWN_AUTHOR.to_owned()),
      category: self.category.unwrap_or_default(),
    })
  }
}
