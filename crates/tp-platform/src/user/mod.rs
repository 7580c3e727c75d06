//! User aggregate: account entity, credential store, admin endpoints.

pub mod api;
pub mod entity;
pub mod repository;
