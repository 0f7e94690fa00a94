//! GraphQL schema and resolvers for Inkwell
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for posts and the current user
//! - Mutation resolvers for posts and account/session management
//! - Type definitions for all GraphQL objects
//! - The authentication guard applied to owner-scoped operations

pub mod guards;
pub mod loaders;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;
pub mod validation;

pub use schema::{build_schema, InkwellSchema};
