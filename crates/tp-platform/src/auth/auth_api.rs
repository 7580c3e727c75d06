//! Auth API Endpoints
//!
//! - POST /login - Password-based login
//! - POST /register - Account creation
//! - GET /me - Current principal info

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::auth::auth_service::{AuthService, AuthSession, RegisterCommand};
use crate::shared::error::MarketError;
use crate::shared::middleware::Authenticated;
use crate::user::entity::Role;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address (becomes the login identifier)
    pub email: String,

    /// Password
    pub password: String,

    /// Password confirmation; must equal `password`
    pub confirm_password: String,

    /// Display name
    pub full_name: String,
}

/// Session established by login or registration
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Opaque bearer token
    pub token: String,
    /// User id
    pub user_id: String,
    /// Email address
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Account role
    pub role: Role,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user_id: session.user.id,
            email: session.user.email,
            full_name: session.user.full_name,
            role: session.user.role,
        }
    }
}

/// Current principal info
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Auth API state
#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: Arc<AuthService>,
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    operation_id = "postAuthLogin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthApiState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, MarketError> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(session.into()))
}

/// Register a new account
///
/// Creates a USER account and establishes a session for it, returning the
/// same shape as login.
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    operation_id = "postAuthRegister",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Passwords do not match"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AuthApiState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, MarketError> {
    let session = state
        .auth_service
        .register(RegisterCommand {
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
            full_name: req.full_name,
        })
        .await?;
    Ok(Json(session.into()))
}

/// Get current principal info
///
/// Answers from the request's resolved principal; no store lookup happens
/// here because claims are trusted for the token's lifetime.
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    operation_id = "getAuthMe",
    responses(
        (status = 200, description = "Current principal info", body = CurrentUserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(auth: Authenticated) -> Json<CurrentUserResponse> {
    let ctx = &auth.0;

    Json(CurrentUserResponse {
        user_id: ctx.user_id.clone(),
        email: ctx.email.clone(),
        full_name: ctx.full_name.clone(),
        role: ctx.role,
    })
}

/// Create the auth router
pub fn auth_router(state: AuthApiState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(register))
        .routes(routes!(get_current_user))
        .with_state(state)
}
