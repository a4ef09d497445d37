//! User — the internal row behind an identity-provider subject.
//!
//! The core never verifies credentials; the `external_id` arriving at the
//! boundary is trusted as already authenticated. A user row is created on the
//! first request that carries a previously-unseen external id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An application user, keyed internally by UUID and externally by the
/// identity provider's opaque subject id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:     Uuid,
  /// Opaque subject id issued by the auth provider.
  pub external_id: String,
  /// Email claim, if the provider supplied one. Used as a secondary lookup
  /// key when the provider re-issues subject ids (account migration).
  pub email:       Option<String>,
  pub created_at:  DateTime<Utc>,
}
