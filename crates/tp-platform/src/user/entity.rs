//! User Entity
//!
//! The marketplace account record. The `role` field is the sole axis of
//! authorization; ownership checks compare user ids directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A persisted user account.
///
/// `id` and `created_at` are assigned by the credential store on first save;
/// a `User` value always represents a stored record. Serialize-only: the
/// stored hash is stripped on the way out, so a serialized account cannot
/// round-trip back into a `User`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    /// Login identifier, unique, matched exactly as stored
    pub email: String,

    /// Display name, free text
    pub full_name: String,

    /// Argon2id PHC string; never serialized into responses or tokens
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    pub created_at: DateTime<Utc>,
}

/// A user record before it has been persisted.
///
/// The credential store turns this into a `User` by assigning the id and
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    /// A regular account as created by self-registration.
    /// Registration can never mint an admin.
    pub fn registered(
        email: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            password_hash: password_hash.into(),
            role: Role::User,
        }
    }

    /// An admin account, only creatable through out-of-band bootstrap.
    pub fn admin(
        email: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            password_hash: password_hash.into(),
            role: Role::Admin,
        }
    }
}
