//! JSON REST API for the Free Daily Motivation backend.
//!
//! Exposes an axum [`Router`] backed by any [`fdm_core::store::QuoteStore`].
//! Credential verification, TLS, and transport concerns are the caller's
//! responsibility: the external user id arriving in a request is trusted as
//! already authenticated by the identity provider in front of this service.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", fdm_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod favorites;
pub mod quotes;

#[cfg(test)]
mod tests;

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
  Router,
  routing::{get, post},
};
use fdm_core::store::QuoteStore;

pub use error::ApiError;

/// Upper bound on any single store call made by a handler; expiry is
/// reported as `StoreUnavailable`.
pub(crate) const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: QuoteStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Favorites
    .route("/favorites", get(favorites::list::<S>))
    .route("/favorites/toggle", post(favorites::toggle::<S>))
    // Anonymous quote browsing
    .route("/quotes", get(quotes::list::<S>))
    .with_state(store)
}

/// Await a store call under [`STORE_TIMEOUT`], folding both failure modes
/// (store error, expiry) into [`ApiError::StoreUnavailable`].
pub(crate) async fn store_call<T, E, F>(fut: F) -> Result<T, ApiError>
where
  E: std::error::Error + Send + Sync + 'static,
  F: Future<Output = Result<T, E>>,
{
  match tokio::time::timeout(STORE_TIMEOUT, fut).await {
    Ok(Ok(value)) => Ok(value),
    Ok(Err(e)) => Err(ApiError::StoreUnavailable(e.to_string())),
    Err(_) => Err(ApiError::StoreUnavailable("store call timed out".into())),
  }
}
