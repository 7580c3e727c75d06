//! Tradepost Platform
//!
//! Stateless authentication and role-based authorization for the Tradepost
//! marketplace backend:
//! - Credential verification and account registration
//! - Signed access token issue and parse (HS256)
//! - Request principal resolution from bearer headers
//! - Role and ownership policy checks at the endpoint seam
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - Data access
//! - `api` - REST endpoints

// Core aggregates
pub mod user;
pub mod item;

// Authentication & authorization
pub mod auth;

// Shared infrastructure
pub mod shared;

// Re-export common types from shared
pub use shared::error::{MarketError, Result};

// Re-export main entity types for convenience
pub use user::entity::{NewUser, Role, User};
pub use item::entity::{Item, NewItem};

// Re-export store boundaries
pub use user::repository::{InMemoryUserStore, UserStore};
pub use item::repository::{InMemoryItemStore, ItemStore};

// Re-export services
pub use auth::auth_service::{AuthService, AuthSession, RegisterCommand};
pub use auth::password_service::{Argon2Config, PasswordService};
pub use auth::token_service::{
    extract_bearer_token, AccessTokenClaims, TokenConfig, TokenError, TokenService,
};
pub use shared::guard::{checks, AuthContext};

/// API surface re-exports
pub mod api {
    // Middleware
    pub use crate::shared::middleware::{AppState, AuthLayer, Authenticated, OptionalAuth};
    pub use crate::shared::api_common::{ApiError, SuccessResponse};

    // API state and router exports from each aggregate
    pub use crate::auth::auth_api::{auth_router, AuthApiState};
    pub use crate::item::api::{items_router, ItemsApiState};
    pub use crate::user::api::{users_router, UsersApiState};
}
