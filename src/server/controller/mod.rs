//! HTTP request handlers.
//!
//! Controllers stay thin: they decode the request, delegate to a service,
//! and map entities to DTOs. All workflow decisions live in the service
//! layer.

pub mod application;
pub mod document;
pub mod inspection;
pub mod inspector;
pub mod requirement;
pub mod stage;
