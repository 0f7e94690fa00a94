//! Authentication guard for GraphQL resolvers
//!
//! Operations that mutate posts or list the caller's own posts require a
//! session identity. The guard rejects sessionless calls with a
//! transport-level error, distinct from the field-level validation errors
//! returned as data.

use async_graphql::{Context, Guard};

use crate::middleware::Session;

/// Guard requiring an authenticated session
///
/// # Example
///
/// ```ignore
/// #[Object]
/// impl PostMutation {
///     #[graphql(guard = "AuthGuard")]
///     async fn create_post(&self, ctx: &Context<'_>, ...) -> Result<PostResponse> {
///         // ... only reached with a session identity present
///     }
/// }
/// ```
pub struct AuthGuard;

impl Guard for AuthGuard {
    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        match ctx.data_opt::<Session>().and_then(|s| s.user_id()) {
            Some(_) => Ok(()),
            None => Err(async_graphql::Error::new("Not authenticated")),
        }
    }
}

/// Get the authenticated user id from the request's session
///
/// Resolvers behind `AuthGuard` use this to read the identity the guard
/// already checked for; the error branch exists for resolvers invoked
/// without the guard.
pub fn session_user_id(ctx: &Context<'_>) -> async_graphql::Result<i32> {
    ctx.data_opt::<Session>()
        .and_then(|s| s.user_id())
        .ok_or_else(|| async_graphql::Error::new("Not authenticated"))
}
