//! Account mutations for the Inkwell GraphQL API
//!
//! This module provides mutations for the account/session lifecycle:
//! - register: Create a new user account and establish a session
//! - login: Verify credentials and establish a session
//! - logout: Destroy the session record and clear the cookie
//!
//! Validation and business-rule failures (duplicate username, unknown
//! user, wrong password) are returned as field errors in the response
//! data. Anything else is an unexpected failure: logged server-side and
//! surfaced as a generic GraphQL error, never swallowed.

use async_graphql::{Context, Object, Result};

use crate::error::ApiError;
use crate::graphql::types::{FieldError, UserResponse};
use crate::graphql::validation::{validate_login, validate_register};
use crate::middleware::Session;
use crate::repositories::SessionStore;
use crate::services::AuthService;

/// Map an unexpected service error to a generic GraphQL error
///
/// The full detail is logged server-side; clients only see a generic
/// message.
fn unexpected_error(error: ApiError) -> async_graphql::Error {
    tracing::error!(error = %error, "Account mutation error");
    async_graphql::Error::new("An unexpected error occurred")
}

/// Account and session mutations
#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Register a new user account
    ///
    /// On success the session is populated with the new user's id, so the
    /// client is logged in immediately. A duplicate username surfaces as a
    /// field error, not a failure.
    async fn register(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<UserResponse> {
        if let Some(errors) = validate_register(&username, &password) {
            return Ok(UserResponse::from_errors(errors));
        }

        let auth_service = ctx.data::<AuthService>()?;
        let session = ctx.data::<Session>()?;

        match auth_service.register(&username, &password).await {
            Ok(user) => {
                session.set_user_id(user.id);
                Ok(UserResponse::from_user(user))
            }
            Err(ApiError::Conflict { .. }) => Ok(UserResponse::from_errors(vec![FieldError::new(
                "username",
                "Username is already taken",
            )])),
            Err(e) => Err(unexpected_error(e)),
        }
    }

    /// Authenticate a user
    ///
    /// An unknown username and a wrong password are reported as field
    /// errors on their respective fields. Success populates the session.
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<UserResponse> {
        if let Some(errors) = validate_login(&username, &password) {
            return Ok(UserResponse::from_errors(errors));
        }

        let auth_service = ctx.data::<AuthService>()?;
        let session = ctx.data::<Session>()?;

        match auth_service.login(&username, &password).await {
            Ok(user) => {
                session.set_user_id(user.id);
                Ok(UserResponse::from_user(user))
            }
            Err(ApiError::NotFound { .. }) => Ok(UserResponse::from_errors(vec![FieldError::new(
                "username",
                "User not found",
            )])),
            Err(ApiError::Unauthorized) => Ok(UserResponse::from_errors(vec![FieldError::new(
                "password",
                "Password is incorrect",
            )])),
            Err(e) => Err(unexpected_error(e)),
        }
    }

    /// Logout the current session
    ///
    /// The session cookie is cleared regardless of outcome; returns false
    /// only when the store reported an error destroying the record.
    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        let session = ctx.data::<Session>()?;
        let session_store = ctx.data::<SessionStore>()?;

        let token = session.token();
        session.destroy();

        match token {
            Some(token) => match session_store.destroy(&token).await {
                Ok(()) => Ok(true),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to destroy session record");
                    Ok(false)
                }
            },
            // No cookie was presented; nothing to destroy
            None => Ok(true),
        }
    }
}
