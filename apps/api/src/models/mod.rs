//! Database models for Inkwell
//!
//! This module contains the SQLx models for:
//! - User accounts
//! - Posts
//! - Session records stored in Redis

pub mod post;
pub mod session;
pub mod user;

pub use post::Post;
pub use session::SessionRecord;
pub use user::User;
