//! Session record stored in Redis
//!
//! A session is a small JSON document keyed by the opaque cookie token.
//! It holds at most one authenticated user id; everything else about the
//! session (expiry) is delegated to the Redis TTL.

use serde::{Deserialize, Serialize};

/// Server-side session record, serialized to JSON in Redis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Authenticated user id, if the client has logged in
    pub user_id: Option<i32>,
}

impl SessionRecord {
    /// Create a record carrying an authenticated user id
    pub fn authenticated(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let record = SessionRecord::authenticated(7);
        let json = serde_json::to_string(&record).unwrap();
        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_default_is_anonymous() {
        assert_eq!(SessionRecord::default().user_id, None);
    }
}
