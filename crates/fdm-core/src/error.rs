//! Error types for `fdm-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A `sort_by` value outside the four supported orderings.
  #[error("unknown sort order: {0:?}")]
  UnknownSortOrder(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
