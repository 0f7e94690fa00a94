//! Post model for Inkwell

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Blog post from the posts table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    /// Unique post identifier
    pub id: i32,

    /// Post title
    pub title: String,

    /// Full post body
    pub body: String,

    /// Owning user's id
    pub author_id: i32,

    /// Post creation timestamp; doubles as the pagination cursor value
    pub created_at: DateTime<Utc>,

    /// Last edit timestamp
    pub updated_at: DateTime<Utc>,
}
