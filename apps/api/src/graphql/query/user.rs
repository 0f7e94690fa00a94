//! User queries for the Inkwell GraphQL API
//!
//! This module provides queries for user data:
//! - currentUser: Get the currently authenticated user

use async_graphql::{Context, Object, Result};

use crate::graphql::types::User;
use crate::middleware::Session;
use crate::repositories::UserRepository;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get the currently authenticated user
    ///
    /// Returns null when the session carries no identity, or when the
    /// identity no longer resolves to a stored user (deleted account).
    /// Never an error for anonymous callers.
    async fn current_user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let session = ctx.data::<Session>()?;

        let Some(user_id) = session.user_id() else {
            return Ok(None);
        };

        let user_repo = ctx.data::<UserRepository>()?;

        let user = user_repo.find_by_id(user_id).await.map_err(|e| {
            tracing::error!(error = %e, user_id, "Failed to fetch current user");
            async_graphql::Error::new("An unexpected error occurred")
        })?;

        Ok(user.map(User::from))
    }
}
