//! Item Entity
//!
//! Marketplace listing. Only the fields the authorization layer needs are
//! modeled here; richer catalog data lives with the external item service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted listing. `owner_id` is the seller's user id and is the basis
/// of the owner-or-admin policy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// A listing before it has been persisted.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub owner_id: String,
}
