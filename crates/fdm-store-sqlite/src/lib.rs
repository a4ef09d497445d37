//! SQLite backend for the Free Daily Motivation quote store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. The single connection also
//! serializes every check-then-act sequence (identity resolution, favorite
//! toggle), which is what makes those operations race-free.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
