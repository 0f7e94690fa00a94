//! Middleware components for the Inkwell API
//!
//! This module provides the per-request session plumbing:
//! - `Session`: request-scoped session handle threaded through the GraphQL
//!   context (never ambient or global)
//! - Cookie helpers for extracting the session token and building
//!   Set-Cookie values

pub mod session;

pub use session::{
    build_session_cookie, clear_session_cookie, extract_session_cookie, Session,
    SessionCookieConfig, SessionState,
};
