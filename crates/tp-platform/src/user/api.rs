//! Admin User Endpoints
//!
//! Role-gated administrative view over accounts.
//! - GET / - List all users (admin-only)

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::shared::error::MarketError;
use crate::shared::guard::checks;
use crate::shared::middleware::Authenticated;
use crate::user::entity::{Role, User};
use crate::user::repository::UserStore;

/// Account summary for admin views; never includes the password hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Users API state
#[derive(Clone)]
pub struct UsersApiState {
    pub user_store: Arc<dyn UserStore>,
}

/// List all user accounts
///
/// Admin-only.
#[utoipa::path(
    get,
    path = "",
    tag = "admin",
    operation_id = "getAdminUsers",
    responses(
        (status = 200, description = "All user accounts", body = [UserSummary]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_users(
    State(state): State<UsersApiState>,
    auth: Authenticated,
) -> Result<Json<Vec<UserSummary>>, MarketError> {
    checks::require_admin(&auth)?;

    let users = state.user_store.find_all().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// Create the admin users router
pub fn users_router(state: UsersApiState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .with_state(state)
}
