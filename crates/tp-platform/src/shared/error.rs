//! Platform Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum MarketError {
    /// Login failure. Deliberately identical for "no such account" and
    /// "wrong password" so responses never reveal whether an email exists.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("An account already exists for email: {email}")]
    EmailTaken { email: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MarketError {
    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::EmailTaken { email: email.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;

/// Error response body
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            MarketError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            MarketError::PasswordMismatch => (StatusCode::BAD_REQUEST, "PASSWORD_MISMATCH"),
            MarketError::EmailTaken { .. } => (StatusCode::CONFLICT, "EMAIL_TAKEN"),
            MarketError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            MarketError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            MarketError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            MarketError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            MarketError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        // Both login failure paths surface this exact message; it must not
        // name the email or distinguish the cause.
        let err = MarketError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_unauthenticated_and_forbidden_are_distinct() {
        let unauth = MarketError::Unauthenticated.into_response();
        let forbidden = MarketError::forbidden("admin only").into_response();
        assert_eq!(unauth.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_email_taken_maps_to_conflict() {
        let resp = MarketError::email_taken("a@x.com").into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
