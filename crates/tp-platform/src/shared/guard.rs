//! Access Control Guard
//!
//! Per-operation policy checks applied after principal resolution and before
//! the protected operation runs. Each handler declares its own policy by
//! calling into `checks`; there is no central dispatch table.

use crate::shared::error::{MarketError, Result};
use crate::auth::token_service::AccessTokenClaims;
use crate::user::entity::Role;

/// The authenticated principal for the current request.
///
/// Built from trusted token claims by the resolver and carried as
/// request-scoped state; it never outlives the request and is never shared
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl AuthContext {
    pub fn from_claims(claims: &AccessTokenClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            email: claims.email.clone(),
            full_name: claims.name.clone(),
            role: claims.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Ownership check: the principal owns the resource or is an admin.
    pub fn can_manage(&self, owner_id: &str) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

/// Policy checks used by protected handlers.
///
/// `Unauthenticated` is produced earlier, by the resolver; by the time a
/// check runs a principal is already present, so failures here are always
/// `Forbidden`.
pub mod checks {
    use super::*;

    /// Admin-only operations.
    pub fn require_admin(context: &AuthContext) -> Result<()> {
        if context.is_admin() {
            Ok(())
        } else {
            Err(MarketError::forbidden("Admin access required"))
        }
    }

    /// Owner-or-admin operations against a resource owned by `owner_id`.
    pub fn require_owner_or_admin(context: &AuthContext, owner_id: &str) -> Result<()> {
        if context.can_manage(owner_id) {
            Ok(())
        } else {
            Err(MarketError::forbidden("Not the owner of this resource"))
        }
    }
}
