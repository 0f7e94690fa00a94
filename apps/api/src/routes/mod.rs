//! HTTP route handlers for the Inkwell API
//!
//! The GraphQL endpoint itself is wired in `main.rs`; this module holds
//! the plain REST surfaces (health checks).

pub mod health;

pub use health::{health_router, HealthState};
