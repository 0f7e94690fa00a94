//! User GraphQL types
//!
//! The GraphQL user never exposes the password hash; the wrapper only
//! surfaces the public columns plus the posts relation.

use async_graphql::{Context, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::models::User as DbUser;
use crate::repositories::PostRepository;

use super::post::Post;
use super::response::FieldError;

/// User account exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl User {
    /// Create a new GraphQL User from a database User
    pub fn new(user: DbUser) -> Self {
        Self { inner: user }
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> i32 {
        self.inner.id
    }

    /// Username chosen at registration
    async fn username(&self) -> &str {
        &self.inner.username
    }

    /// Posts owned by this user, newest first
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let post_repo = ctx.data::<PostRepository>()?;

        let posts = post_repo.list_by_author(self.inner.id).await.map_err(|e| {
            tracing::error!(error = %e, user_id = self.inner.id, "Failed to fetch user's posts");
            async_graphql::Error::new("An unexpected error occurred")
        })?;

        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Account creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Last account update timestamp
    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }
}

/// Response for account mutations: the user or field-level errors
#[derive(SimpleObject)]
pub struct UserResponse {
    /// The registered or authenticated user
    pub user: Option<User>,
    /// Validation failures, if any
    pub errors: Option<Vec<FieldError>>,
}

impl UserResponse {
    /// Successful response carrying a user
    pub fn from_user(user: DbUser) -> Self {
        Self {
            user: Some(User::from(user)),
            errors: None,
        }
    }

    /// Failed response carrying field errors
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            user: None,
            errors: Some(errors),
        }
    }
}
