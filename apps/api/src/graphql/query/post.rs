//! Post queries for the Inkwell GraphQL API
//!
//! This module provides queries for post data:
//! - posts: Cursor-paginated listing, newest first
//! - post: Single post lookup by id
//! - getPostsByUser: All posts owned by the caller (auth required)

use async_graphql::{Context, Object, Result};

use crate::graphql::guards::{session_user_id, AuthGuard};
use crate::graphql::pagination::{clamp_take, parse_cursor};
use crate::graphql::types::{PaginatedPosts, Post};
use crate::repositories::PostRepository;

/// Post-related queries
#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// List posts, newest first, with cursor pagination
    ///
    /// `take` is clamped to at most 50. The cursor is the `createdAt` of a
    /// previously returned post; when supplied, the page starts immediately
    /// after that post. `hasMore` reports whether older posts remain.
    async fn posts(
        &self,
        ctx: &Context<'_>,
        take: i32,
        cursor: Option<String>,
    ) -> Result<PaginatedPosts> {
        let post_repo = ctx.data::<PostRepository>()?;

        let limit = clamp_take(take);

        let before = match cursor.as_deref() {
            Some(raw) => Some(
                parse_cursor(raw).ok_or_else(|| async_graphql::Error::new("invalid cursor"))?,
            ),
            None => None,
        };

        // Fetch one extra row past the page to detect whether more exist
        let mut posts = post_repo.list_page(limit + 1, before).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list posts");
            async_graphql::Error::new("An unexpected error occurred")
        })?;

        let has_more = posts.len() as i64 == limit + 1;
        posts.truncate(limit as usize);

        Ok(PaginatedPosts {
            posts: posts.into_iter().map(Post::from).collect(),
            has_more,
        })
    }

    /// Get a single post by id
    ///
    /// Returns null when the post does not exist.
    async fn post(&self, ctx: &Context<'_>, post_id: i32) -> Result<Option<Post>> {
        let post_repo = ctx.data::<PostRepository>()?;

        let post = post_repo.find_by_id(post_id).await.map_err(|e| {
            tracing::error!(error = %e, post_id, "Failed to fetch post");
            async_graphql::Error::new("An unexpected error occurred")
        })?;

        Ok(post.map(Post::from))
    }

    /// List all posts owned by the caller, newest first
    #[graphql(guard = "AuthGuard")]
    async fn get_posts_by_user(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let user_id = session_user_id(ctx)?;
        let post_repo = ctx.data::<PostRepository>()?;

        let posts = post_repo.list_by_author(user_id).await.map_err(|e| {
            tracing::error!(error = %e, user_id, "Failed to list user's posts");
            async_graphql::Error::new("An unexpected error occurred")
        })?;

        Ok(posts.into_iter().map(Post::from).collect())
    }
}
