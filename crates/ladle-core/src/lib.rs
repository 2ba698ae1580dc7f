//! Shared plumbing for Ladle services: health endpoints, gateway identity
//! extractors, request-id middleware and tracing setup.

pub mod health;
pub mod identity;
pub mod middleware;
pub mod tracing;
