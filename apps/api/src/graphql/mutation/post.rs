//! Post mutations for the Inkwell GraphQL API
//!
//! This module provides mutations for post management:
//! - createPost: Create a post owned by the caller
//! - updatePost: Edit a post the caller owns
//! - deletePost: Delete a post the caller owns
//!
//! Ownership rules: updating a post that does not exist or belongs to
//! someone else returns null — deliberately indistinguishable, so
//! non-owners learn nothing about a post's existence. Deleting follows the
//! same shape with booleans: missing posts delete "successfully"
//! (idempotent), foreign posts are silently refused.

use async_graphql::{Context, Object, Result};

use crate::graphql::guards::{session_user_id, AuthGuard};
use crate::graphql::types::PostResponse;
use crate::graphql::validation::validate_post;
use crate::repositories::PostRepository;

/// Map a database error to a generic GraphQL error
fn storage_error(error: sqlx::Error, op: &'static str) -> async_graphql::Error {
    tracing::error!(error = %error, op, "Post mutation error");
    async_graphql::Error::new("An unexpected error occurred")
}

/// Post mutations
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Create a new post owned by the caller
    #[graphql(guard = "AuthGuard")]
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        body: String,
    ) -> Result<PostResponse> {
        if let Some(errors) = validate_post(&title, &body) {
            return Ok(PostResponse::from_errors(errors));
        }

        let user_id = session_user_id(ctx)?;
        let post_repo = ctx.data::<PostRepository>()?;

        let post = post_repo
            .create(&title, &body, user_id)
            .await
            .map_err(|e| storage_error(e, "create"))?;

        Ok(PostResponse::from_post(post))
    }

    /// Update a post the caller owns
    ///
    /// Returns null when the post does not exist or is owned by someone
    /// else; validation failures are returned as field errors.
    #[graphql(guard = "AuthGuard")]
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        post_id: i32,
        title: String,
        body: String,
    ) -> Result<Option<PostResponse>> {
        let user_id = session_user_id(ctx)?;
        let post_repo = ctx.data::<PostRepository>()?;

        let existing = post_repo
            .find_by_id(post_id)
            .await
            .map_err(|e| storage_error(e, "update"))?;

        let Some(existing) = existing else {
            return Ok(None);
        };
        if existing.author_id != user_id {
            return Ok(None);
        }

        if let Some(errors) = validate_post(&title, &body) {
            return Ok(Some(PostResponse::from_errors(errors)));
        }

        let updated = post_repo
            .update(post_id, &title, &body)
            .await
            .map_err(|e| storage_error(e, "update"))?;

        // A concurrent delete between the ownership check and the write
        // surfaces as not-found
        Ok(updated.map(PostResponse::from_post))
    }

    /// Delete a post the caller owns
    ///
    /// Returns true when the post is gone afterwards (deleted now, or
    /// never existed); false when it exists but belongs to someone else.
    #[graphql(guard = "AuthGuard")]
    async fn delete_post(&self, ctx: &Context<'_>, post_id: i32) -> Result<bool> {
        let user_id = session_user_id(ctx)?;
        let post_repo = ctx.data::<PostRepository>()?;

        let existing = post_repo
            .find_by_id(post_id)
            .await
            .map_err(|e| storage_error(e, "delete"))?;

        let Some(existing) = existing else {
            return Ok(true);
        };
        if existing.author_id != user_id {
            return Ok(false);
        }

        post_repo
            .delete(post_id)
            .await
            .map_err(|e| storage_error(e, "delete"))?;

        Ok(true)
    }
}
