//! Authentication
//!
//! Password hashing, token issuance/parsing, and the login/register
//! orchestration plus their HTTP endpoints.

pub mod auth_api;
pub mod auth_service;
pub mod password_service;
pub mod token_service;
