//! Post GraphQL types
//!
//! This module defines the GraphQL type for posts with the author
//! relationship resolver, plus the paginated listing and mutation
//! response wrappers.

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::graphql::loaders::AuthorLoader;
use crate::models::Post as DbPost;

use super::response::FieldError;
use super::user::User;

/// Number of characters in the list-view body preview
const SNIPPET_LEN: usize = 50;

/// Take the leading preview of a post body
///
/// Character-based truncation, not word-aware; bodies shorter than the
/// preview length pass through whole.
fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LEN).collect()
}

/// Blog post exposed via GraphQL
pub struct Post {
    inner: DbPost,
}

impl Post {
    /// Create a new GraphQL Post from a database Post
    pub fn new(post: DbPost) -> Self {
        Self { inner: post }
    }
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self::new(post)
    }
}

#[Object]
impl Post {
    /// Unique post identifier
    async fn id(&self) -> i32 {
        self.inner.id
    }

    /// Post title
    async fn title(&self) -> &str {
        &self.inner.title
    }

    /// Full post body
    async fn body(&self) -> &str {
        &self.inner.body
    }

    /// First 50 characters of the body, for list views
    async fn body_snippet(&self) -> String {
        snippet(&self.inner.body)
    }

    /// Owning user's id
    async fn author_id(&self) -> i32 {
        self.inner.author_id
    }

    /// The owning user
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let loader = ctx.data::<DataLoader<AuthorLoader>>()?;
        let author = loader.load_one(self.inner.author_id).await?;

        author
            .map(User::from)
            .ok_or_else(|| async_graphql::Error::new("post author not found"))
    }

    /// Post creation timestamp; also serves as the pagination cursor
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Last edit timestamp
    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }
}

/// One page of posts plus a flag for whether older posts remain
#[derive(SimpleObject)]
pub struct PaginatedPosts {
    /// The page of posts, newest first
    pub posts: Vec<Post>,
    /// True when more posts exist past the end of this page
    pub has_more: bool,
}

/// Response for post mutations: the post or field-level errors
#[derive(SimpleObject)]
pub struct PostResponse {
    /// The created or updated post
    pub post: Option<Post>,
    /// Validation failures, if any
    pub errors: Option<Vec<FieldError>>,
}

impl PostResponse {
    /// Successful response carrying a post
    pub fn from_post(post: DbPost) -> Self {
        Self {
            post: Some(Post::from(post)),
            errors: None,
        }
    }

    /// Failed response carrying field errors
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            post: None,
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncates_to_fifty_chars() {
        let body = "x".repeat(200);
        let preview = snippet(&body);
        assert_eq!(preview.chars().count(), 50);
        assert_eq!(preview, "x".repeat(50));
    }

    #[test]
    fn test_snippet_short_body_untouched() {
        assert_eq!(snippet("short body"), "short body");
        assert_eq!(snippet(""), "");
    }

    #[test]
    fn test_snippet_counts_characters_not_bytes() {
        let body = "ä".repeat(60);
        let preview = snippet(&body);
        assert_eq!(preview.chars().count(), 50);
    }
}
