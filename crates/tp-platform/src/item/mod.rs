//! Item aggregate: listing entity, store boundary, protected endpoints.

pub mod api;
pub mod entity;
pub mod repository;
