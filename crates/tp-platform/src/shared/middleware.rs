//! API Middleware
//!
//! Principal resolution for Axum. The `Authenticated` and `OptionalAuth`
//! extractors read the bearer token from the Authorization header and attach
//! the resolved principal to the request being handled. All token-validity
//! failures collapse to "no principal"; protected routes answer 401 without
//! surfacing token-parse detail.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::auth::token_service::{extract_bearer_token, TokenService};
use crate::shared::api_common::ApiError;
use crate::shared::guard::AuthContext;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
}

/// Authenticated principal extractor.
///
/// Validates the bearer token and yields the request's `AuthContext`;
/// rejects with 401 when the token is missing or invalid.
pub struct Authenticated(pub AuthContext);

impl std::ops::Deref for Authenticated {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection for authentication failures.
///
/// The 401 message is deliberately generic: an expired, tampered, or absent
/// token all read the same from outside. A missing `AppState` is a server
/// misconfiguration, not an anonymous request, and surfaces as 500.
pub struct AuthError {
    status: StatusCode,
    message: String,
}

impl AuthError {
    fn unauthenticated() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Authentication required".to_string(),
        }
    }

    fn not_configured() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Auth service not configured".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            "INTERNAL_ERROR"
        } else {
            "UNAUTHENTICATED"
        };
        let body = ApiError {
            error: error.to_string(),
            message: self.message,
            details: None,
        };
        (self.status, Json(body)).into_response()
    }
}

fn resolve_token_context(app_state: &AppState, parts: &Parts) -> Option<AuthContext> {
    let token = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer_token)?;

    let claims = app_state.token_service.parse(token).ok()?;

    Some(AuthContext::from_claims(&claims))
}

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by the middleware layer; absent only when the layer was not
        // installed.
        let app_state = parts
            .extensions
            .get::<AppState>()
            .ok_or_else(AuthError::not_configured)?;

        resolve_token_context(app_state, parts)
            .map(Authenticated)
            .ok_or_else(AuthError::unauthenticated)
    }
}

/// Optional principal extractor.
///
/// Yields `None` for anonymous requests and for requests whose token fails
/// validation; public endpoints treat both the same.
pub struct OptionalAuth(pub Option<AuthContext>);

impl std::ops::Deref for OptionalAuth {
    type Target = Option<AuthContext>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(app_state) = parts.extensions.get::<AppState>() else {
            return Ok(OptionalAuth(None));
        };

        Ok(OptionalAuth(resolve_token_context(app_state, parts)))
    }
}

/// Middleware layer that injects AppState into request extensions
/// This enables the Authenticated extractor to work
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::Layer;
use tower::Service;

#[derive(Clone)]
pub struct AuthLayer {
    state: AppState,
}

impl AuthLayer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            state: self.state.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    state: AppState,
}

impl<S, B> Service<axum::http::Request<B>> for AuthMiddleware<S>
where
    S: Service<axum::http::Request<B>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(self.state.clone());

        let future = self.inner.call(req);
        Box::pin(async move { future.await })
    }
}
