//! Quote, author, and category reference data.
//!
//! All three entities are read-only from the core's perspective: they are
//! provisioned out-of-band (seed/import scripts) and never mutated by any
//! request path. The only mutable core state is the favorite link record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label substituted when a quote's author join fails to resolve.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
  pub author_id: Uuid,
  pub name:      String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
  pub category_id: Uuid,
  pub name:        String,
}

/// A quote as stored: raw foreign keys, no denormalized names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
  pub quote_id:    Uuid,
  pub text:        String,
  pub author_id:   Uuid,
  pub category_id: Option<Uuid>,
}

/// A quote as read: author and category already joined and fallback-applied.
///
/// `author` is never empty — an unresolvable author renders as
/// [`UNKNOWN_AUTHOR`]. `category` is the empty string for uncategorized
/// quotes; callers treat that as "no category", never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
  pub quote_id: Uuid,
  pub text:     String,
  pub author:   String,
  pub category: String,
}
