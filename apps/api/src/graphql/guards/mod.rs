//! GraphQL guards for the Inkwell API
//!
//! This module provides guards for securing GraphQL resolvers; the auth
//! guard is applied to every operation that needs an ownership context.

mod auth;

pub use auth::{session_user_id, AuthGuard};
