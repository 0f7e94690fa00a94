//! Author DataLoader for batched fetching
//!
//! This loader batches multiple author ID lookups into a single database
//! query, so resolving `author` across a page of posts costs one query
//! instead of one per post.

use async_graphql::dataloader::Loader;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::User;

/// DataLoader for batching author queries
#[derive(Clone)]
pub struct AuthorLoader {
    pool: PgPool,
}

impl AuthorLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader<i32> for AuthorLoader {
    type Value = User;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let users: Vec<User> = sqlx::query_as(
            "SELECT id, username, password_hash, created_at, updated_at FROM users WHERE id = ANY($1)",
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await
        .map_err(Arc::new)?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
