//! Shared infrastructure: errors, principal resolution, access control.

pub mod api_common;
pub mod error;
pub mod guard;
pub mod middleware;
