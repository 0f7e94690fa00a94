//! GraphQL schema builder for Inkwell
//!
//! This module provides the schema construction for the async-graphql API.

use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

use crate::repositories::{PostRepository, SessionStore, UserRepository};
use crate::services::AuthService;

use super::loaders::AuthorLoader;
use super::mutation::Mutation;
use super::query::Query;

/// The Inkwell GraphQL schema type
pub type InkwellSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
pub struct SchemaBuilder {
    pool: Option<PgPool>,
    auth_service: Option<AuthService>,
    session_store: Option<SessionStore>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            pool: None,
            auth_service: None,
            session_store: None,
        }
    }

    /// Set the database pool
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Set the auth service
    pub fn auth_service(mut self, auth_service: AuthService) -> Self {
        self.auth_service = Some(auth_service);
        self
    }

    /// Set the session store
    pub fn session_store(mut self, session_store: SessionStore) -> Self {
        self.session_store = Some(session_store);
        self
    }

    /// Build the schema with all configured services
    ///
    /// The per-request `Session` handle is not part of the schema data;
    /// the HTTP handler injects it into each request.
    ///
    /// # Panics
    /// Panics if required services (pool, auth_service, session_store)
    /// are not configured
    pub fn build(self) -> InkwellSchema {
        let pool = self.pool.expect("database pool is required");
        let auth_service = self.auth_service.expect("auth service is required");
        let session_store = self.session_store.expect("session store is required");

        Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .data(UserRepository::new(pool.clone()))
            .data(PostRepository::new(pool.clone()))
            .data(DataLoader::new(
                AuthorLoader::new(pool.clone()),
                tokio::spawn,
            ))
            .data(pool)
            .data(auth_service)
            .data(session_store)
            .finish()
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new GraphQL schema with the provided services
///
/// This is a convenience function for quickly creating a schema
/// with all required dependencies.
pub fn build_schema(
    pool: PgPool,
    auth_service: AuthService,
    session_store: SessionStore,
) -> InkwellSchema {
    SchemaBuilder::new()
        .pool(pool)
        .auth_service(auth_service)
        .session_store(session_store)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Integration tests exercising the schema live in the
    // integration test suite, which builds it with a lazy pool.

    #[test]
    fn test_schema_builder_default() {
        let builder = SchemaBuilder::default();
        assert!(builder.pool.is_none());
        assert!(builder.auth_service.is_none());
        assert!(builder.session_store.is_none());
    }
}
