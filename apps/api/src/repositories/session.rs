//! Redis-backed session store
//!
//! Sessions live entirely in Redis: an opaque cookie token maps to a small
//! JSON record with a time-to-live. Expiry is delegated to Redis; the
//! application only ever reads, writes, or deletes the record addressed by
//! the token it was handed.

use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::session::SessionRecord;

/// Key prefix for session records in Redis
const KEY_PREFIX: &str = "session";

/// Store for per-client session records
///
/// Cloneable handle over a shared Redis client; safe for concurrent use
/// from multiple request handlers.
#[derive(Clone)]
pub struct SessionStore {
    client: Arc<redis::Client>,
    ttl_secs: u64,
}

impl SessionStore {
    /// Create a new SessionStore with the given record time-to-live
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self {
            client: Arc::new(client),
            ttl_secs,
        }
    }

    /// Session record time-to-live in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Load the session record for a token
    ///
    /// # Returns
    /// * `Ok(Some(SessionRecord))` - If a live record exists
    /// * `Ok(None)` - If the token is unknown or the record has expired
    /// * `Err(ApiError)` - If the store is unreachable or the record is corrupt
    pub async fn load(&self, token: &str) -> ApiResult<Option<SessionRecord>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let raw: Option<String> = redis::cmd("GET")
            .arg(session_key(token))
            .query_async(&mut conn)
            .await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Write the session record for a token, resetting its time-to-live
    pub async fn save(&self, token: &str, record: &SessionRecord) -> ApiResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(record)?;

        redis::cmd("SET")
            .arg(session_key(token))
            .arg(json)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;

        Ok(())
    }

    /// Destroy the session record for a token
    ///
    /// Destroying an unknown token is not an error; the record may already
    /// have expired.
    pub async fn destroy(&self, token: &str) -> ApiResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        redis::cmd("DEL")
            .arg(session_key(token))
            .query_async::<_, ()>(&mut conn)
            .await?;

        Ok(())
    }

    /// Ping the store, for readiness checks
    pub async fn ping(&self) -> ApiResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;

        if pong == "PONG" {
            Ok(())
        } else {
            Err(ApiError::Internal(format!(
                "unexpected PING reply: {}",
                pong
            )))
        }
    }
}

/// Redis key for a session token
fn session_key(token: &str) -> String {
    format!("{}:{}", KEY_PREFIX, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_format() {
        assert_eq!(session_key("abc123"), "session:abc123");
    }

    #[test]
    fn test_store_keeps_configured_ttl() {
        let client = redis::Client::open("redis://localhost:6379").unwrap();
        let store = SessionStore::new(client, 604800);
        assert_eq!(store.ttl_secs(), 604800);
    }
}
