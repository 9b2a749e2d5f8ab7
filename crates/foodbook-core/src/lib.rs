//! Service plumbing shared by Foodbook binaries.
//!
//! Tracing setup, health endpoints, request-id middleware, and response
//! serialization helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
