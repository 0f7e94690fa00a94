//! Request-scoped session handle and cookie helpers
//!
//! The HTTP layer loads the session record named by the client's cookie,
//! wraps it in a `Session` handle, and injects the handle into the GraphQL
//! context. Resolvers read or mutate the handle; after execution the HTTP
//! layer persists a dirty session (issuing a token and cookie if the
//! client had none) or clears the cookie of a destroyed one.

use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderMap};
use uuid::Uuid;

/// Cookie settings shared by every request handler
#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    /// Cookie name presented to the client
    pub name: String,
    /// Cookie and store record time-to-live in seconds
    pub ttl_secs: u64,
    /// Whether to set the Secure attribute (production only)
    pub secure: bool,
}

/// Lifecycle state of a request's session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Loaded (or absent) and untouched; nothing to write back
    Clean,
    /// Mutated during this request; must be persisted
    Dirty,
    /// Destroyed during this request; the cookie must be cleared
    Destroyed,
}

#[derive(Debug)]
struct SessionInner {
    token: Option<String>,
    user_id: Option<i32>,
    state: SessionState,
}

/// Per-request session handle
///
/// Cloneable; all clones share state, so the handle stored in the GraphQL
/// context and the one held by the HTTP layer observe each other's
/// mutations. The mutex is only held for field access, never across await
/// points.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<Mutex<SessionInner>>,
}

impl Session {
    /// Create a session for a client without a usable cookie
    pub fn anonymous() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                token: None,
                user_id: None,
                state: SessionState::Clean,
            })),
        }
    }

    /// Create a session restored from the store
    pub fn restored(token: impl Into<String>, user_id: Option<i32>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                token: Some(token.into()),
                user_id,
                state: SessionState::Clean,
            })),
        }
    }

    /// The authenticated user id, if any
    pub fn user_id(&self) -> Option<i32> {
        self.inner.lock().expect("session lock poisoned").user_id
    }

    /// The opaque token the client presented, if any
    pub fn token(&self) -> Option<String> {
        self.inner
            .lock()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.inner.lock().expect("session lock poisoned").state
    }

    /// Record a successful login or registration
    pub fn set_user_id(&self, user_id: i32) {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.user_id = Some(user_id);
        inner.state = SessionState::Dirty;
    }

    /// Mark the session destroyed; the identity is gone immediately
    pub fn destroy(&self) {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.user_id = None;
        inner.state = SessionState::Destroyed;
    }

    /// Return the token, generating and remembering a fresh one if absent
    ///
    /// Called by the HTTP layer when persisting a dirty session for a
    /// client that had no cookie yet.
    pub fn token_or_generate(&self) -> String {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        match &inner.token {
            Some(token) => token.clone(),
            None => {
                let token = Uuid::new_v4().to_string();
                inner.token = Some(token.clone());
                token
            }
        }
    }
}

/// Extract the session token from the Cookie header
///
/// Cookie pairs are separated by `; `; the value runs to the next
/// separator. Returns None for a missing header or a missing/empty pair.
pub fn extract_session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let value = headers.get(header::COOKIE).and_then(|v| v.to_str().ok())?;

    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let name = parts.next()?;
        let token = parts.next()?;

        if name == cookie_name && !token.is_empty() {
            return Some(token.to_string());
        }
    }

    None
}

/// Build the Set-Cookie value issuing or refreshing a session cookie
///
/// Always HttpOnly and SameSite=Lax; Secure only when the server runs in
/// production.
pub fn build_session_cookie(name: &str, token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the Set-Cookie value clearing the session cookie
pub fn clear_session_cookie(name: &str, secure: bool) -> String {
    build_session_cookie(name, "", 0, secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_session_cookie() {
        let headers = headers_with_cookie("sid=abc123");
        assert_eq!(
            extract_session_cookie(&headers, "sid"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_session_cookie_among_others() {
        let headers = headers_with_cookie("theme=dark; sid=abc123; lang=en");
        assert_eq!(
            extract_session_cookie(&headers, "sid"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_session_cookie_missing() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(extract_session_cookie(&headers, "sid"), None);
        assert_eq!(extract_session_cookie(&HeaderMap::new(), "sid"), None);
    }

    #[test]
    fn test_extract_session_cookie_empty_value() {
        let headers = headers_with_cookie("sid=");
        assert_eq!(extract_session_cookie(&headers, "sid"), None);
    }

    #[test]
    fn test_cookie_round_trip() {
        let cookie = build_session_cookie("sid", "tok-1", 604800, false);
        let pair = cookie.split(';').next().unwrap();
        let headers = headers_with_cookie(pair);
        assert_eq!(
            extract_session_cookie(&headers, "sid"),
            Some("tok-1".to_string())
        );
    }

    #[test]
    fn test_build_session_cookie_flags() {
        let cookie = build_session_cookie("sid", "tok", 604800, true);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("Secure"));

        let dev_cookie = build_session_cookie("sid", "tok", 604800, false);
        assert!(!dev_cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_session_cookie() {
        let cookie = clear_session_cookie("sid", false);
        assert!(cookie.starts_with("sid=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_starts_clean() {
        let session = Session::anonymous();
        assert_eq!(session.state(), SessionState::Clean);
        assert_eq!(session.user_id(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_login_marks_dirty() {
        let session = Session::anonymous();
        session.set_user_id(7);
        assert_eq!(session.state(), SessionState::Dirty);
        assert_eq!(session.user_id(), Some(7));
    }

    #[test]
    fn test_destroy_clears_identity() {
        let session = Session::restored("tok", Some(7));
        session.destroy();
        assert_eq!(session.state(), SessionState::Destroyed);
        assert_eq!(session.user_id(), None);
        // token is kept so the store record can still be addressed
        assert_eq!(session.token(), Some("tok".to_string()));
    }

    #[test]
    fn test_token_or_generate_is_stable() {
        let session = Session::anonymous();
        let first = session.token_or_generate();
        let second = session.token_or_generate();
        assert_eq!(first, second);

        let restored = Session::restored("existing", None);
        assert_eq!(restored.token_or_generate(), "existing");
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::anonymous();
        let clone = session.clone();
        clone.set_user_id(3);
        assert_eq!(session.user_id(), Some(3));
    }
}
