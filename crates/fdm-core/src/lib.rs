//! Core types and trait definitions for the Free Daily Motivation backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod favorite;
pub mod quote;
pub mod rank;
pub mod shape;
pub mod store;
pub mod user;

pub use error::{Error, Result};
