//! Tradepost Server
//!
//! Production server for the marketplace REST APIs:
//! - Auth APIs: login, register, current principal
//! - Item APIs: public listings plus owner-gated writes
//! - Admin APIs: account overview
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TP_API_PORT` | `8080` | HTTP API port |
//! | `TP_JWT_SECRET` | - | HMAC signing secret (required) |
//! | `TP_JWT_ISSUER` | `tradepost` | JWT issuer claim |
//! | `TP_TOKEN_EXPIRY_SECS` | `86400` | Access token lifetime |
//! | `TP_ADMIN_EMAIL` | - | Bootstrap admin account email |
//! | `TP_ADMIN_PASSWORD` | - | Bootstrap admin account password |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use tp_platform::api::{
    auth_router, items_router, users_router, AppState, AuthApiState, AuthLayer, ItemsApiState,
    UsersApiState,
};
use tp_platform::{
    Argon2Config, AuthService, InMemoryItemStore, InMemoryUserStore, NewUser, PasswordService,
    TokenConfig, TokenService, UserStore,
};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    tp_common::logging::init_logging("tp-server");

    info!("Starting Tradepost Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("TP_API_PORT", 8080);
    let jwt_secret =
        std::env::var("TP_JWT_SECRET").context("TP_JWT_SECRET must be set")?;
    let jwt_issuer = env_or("TP_JWT_ISSUER", "tradepost");
    let token_expiry_secs: i64 = env_or_parse("TP_TOKEN_EXPIRY_SECS", 86400);

    // Stores
    let user_store = Arc::new(InMemoryUserStore::new());
    let item_store = Arc::new(InMemoryItemStore::new());

    // Services
    let token_service = Arc::new(TokenService::new(TokenConfig {
        secret_key: jwt_secret,
        issuer: jwt_issuer,
        token_expiry_secs,
    }));
    let password_service = Arc::new(PasswordService::new(Argon2Config::default()));
    let auth_service = Arc::new(AuthService::new(
        user_store.clone(),
        password_service.clone(),
        token_service.clone(),
    ));
    info!("Auth services initialized");

    // Bootstrap admin account from environment if configured. Registration
    // only ever creates USER accounts, so this is the single admin entry
    // point.
    if let (Ok(email), Ok(password)) = (
        std::env::var("TP_ADMIN_EMAIL"),
        std::env::var("TP_ADMIN_PASSWORD"),
    ) {
        if user_store.exists_by_email(&email).await? {
            info!(email = %email, "Admin account already present");
        } else {
            let hash = password_service.hash_password(&password)?;
            let admin = user_store
                .save(NewUser::admin(email, "Administrator", hash))
                .await?;
            info!(user_id = %admin.id, "Admin account bootstrapped");
        }
    }

    // Create AppState for principal resolution
    let app_state = AppState {
        token_service: token_service.clone(),
    };

    // Build API states
    let auth_state = AuthApiState { auth_service };
    let items_state = ItemsApiState { item_store };
    let users_state = UsersApiState { user_store };

    // Build API router using OpenApiRouter for auto-collected OpenAPI paths
    let (router, mut openapi) = OpenApiRouter::new()
        .nest("/api/auth", auth_router(auth_state))
        .nest("/api/items", items_router(items_state))
        .nest("/api/admin/users", users_router(users_state))
        .split_for_parts();

    openapi.info.title = "Tradepost API".to_string();
    openapi.info.version = "1.0.0".to_string();
    openapi.info.description =
        Some("REST APIs for accounts, sessions, and listings".to_string());

    let app = Router::new()
        .merge(router)
        .route("/health", get(health_handler))
        // OpenAPI / Swagger UI with auto-collected paths
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", openapi))
        // Auth middleware
        .layer(AuthLayer::new(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start API server
    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let api_listener = TcpListener::bind(&api_addr).await?;
    let api_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(api_listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    info!("Tradepost Server started");
    info!("Press Ctrl+C to shutdown");

    // Wait for shutdown
    shutdown_signal().await;
    info!("Shutdown signal received...");

    api_task.abort();

    info!("Tradepost Server shutdown complete");
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
