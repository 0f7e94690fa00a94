//! Post repository for centralized database operations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::post::Post;

const POST_COLUMNS: &str = "id, title, body, author_id, created_at, updated_at";

/// Repository for post database operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new PostRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find a post by its unique ID
    pub async fn find_by_id(&self, post_id: i32) -> Result<Option<Post>, sqlx::Error> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Fetch one page of posts, newest first
    ///
    /// With a cursor, only posts created strictly before it are returned,
    /// so the page starts immediately after the cursor item. Callers fetch
    /// `limit + 1` rows to detect whether more pages exist.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of rows to fetch
    /// * `before` - Optional creation-time cursor
    pub async fn list_page(
        &self,
        limit: i64,
        before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Post>, sqlx::Error> {
        match before {
            Some(cursor) => {
                let sql = format!(
                    "SELECT {} FROM posts WHERE created_at < $1 ORDER BY created_at DESC LIMIT $2",
                    POST_COLUMNS
                );
                sqlx::query_as::<_, Post>(&sql)
                    .bind(cursor)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM posts ORDER BY created_at DESC LIMIT $1",
                    POST_COLUMNS
                );
                sqlx::query_as::<_, Post>(&sql)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
        }
    }

    /// Find all posts owned by a user, newest first
    pub async fn list_by_author(&self, author_id: i32) -> Result<Vec<Post>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = $1 ORDER BY created_at DESC",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Create a new post owned by the given author
    pub async fn create(
        &self,
        title: &str,
        body: &str,
        author_id: i32,
    ) -> Result<Post, sqlx::Error> {
        let sql = format!(
            "INSERT INTO posts (title, body, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(title)
            .bind(body)
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Update a post's title and body
    ///
    /// Ownership must be checked by the caller before updating.
    ///
    /// # Returns
    /// * `Ok(Some(Post))` - The updated post
    /// * `Ok(None)` - If the post vanished between the ownership check and
    ///   the write (a benign race; surfaces as not-found)
    pub async fn update(
        &self,
        post_id: i32,
        title: &str,
        body: &str,
    ) -> Result<Option<Post>, sqlx::Error> {
        let sql = format!(
            "UPDATE posts SET title = $1, body = $2, updated_at = NOW() WHERE id = $3 RETURNING {}",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(title)
            .bind(body)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete a post by ID
    ///
    /// Ownership must be checked by the caller before deleting.
    ///
    /// # Returns
    /// * `Ok(u64)` - The number of rows deleted (0 or 1)
    pub async fn delete(&self, post_id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
