//! Field-level error type shared by mutation responses
//!
//! Validation and business-rule failures are returned as data inside the
//! operation's response object, never as transport-level errors.

use async_graphql::SimpleObject;

/// A validation failure tied to a specific input field
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct FieldError {
    /// The input field the error refers to
    pub field: String,
    /// Human-readable message for the client to display
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
