//! User account model for Inkwell

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// User account from the users table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: i32,

    /// Unique username chosen at registration
    pub username: String,

    /// Argon2 hashed password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last account update timestamp
    pub updated_at: DateTime<Utc>,
}
