//! Field validation for account and post inputs
//!
//! Validators are pure functions returning `None` when the input is valid,
//! or a list of field errors otherwise. Validation is first-error-wins:
//! each failure reports exactly one field, in a fixed check order.

use super::types::FieldError;

/// Minimum password length for registration
pub const MIN_PASSWORD_LEN: usize = 5;

/// Validate a registration form
pub fn validate_register(username: &str, password: &str) -> Option<Vec<FieldError>> {
    if username.is_empty() {
        return Some(vec![FieldError::new(
            "username",
            "Please enter a username",
        )]);
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(vec![FieldError::new(
            "password",
            "Password must be at least 5 characters long",
        )]);
    }

    None
}

/// Validate a login form
pub fn validate_login(username: &str, password: &str) -> Option<Vec<FieldError>> {
    if username.is_empty() {
        return Some(vec![FieldError::new(
            "username",
            "Please enter a username",
        )]);
    }

    if password.is_empty() {
        return Some(vec![FieldError::new(
            "password",
            "Please enter a password",
        )]);
    }

    None
}

/// Validate a post create/update form
pub fn validate_post(title: &str, body: &str) -> Option<Vec<FieldError>> {
    if title.is_empty() {
        return Some(vec![FieldError::new("title", "Enter a title")]);
    }

    if body.is_empty() {
        return Some(vec![FieldError::new("body", "Body cannot be left empty")]);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_error(errors: Option<Vec<FieldError>>) -> FieldError {
        let errors = errors.expect("expected a validation failure");
        assert_eq!(errors.len(), 1);
        errors.into_iter().next().unwrap()
    }

    #[test]
    fn test_register_empty_username() {
        let error = single_error(validate_register("", "abcd"));
        assert_eq!(error.field, "username");
        assert_eq!(error.message, "Please enter a username");
    }

    #[test]
    fn test_register_short_password() {
        let error = single_error(validate_register("bob", "1234"));
        assert_eq!(error.field, "password");
        assert_eq!(error.message, "Password must be at least 5 characters long");
    }

    #[test]
    fn test_register_five_char_password_passes() {
        assert!(validate_register("bob", "12345").is_none());
    }

    #[test]
    fn test_register_first_error_wins() {
        // both fields invalid: only the username error is reported
        let error = single_error(validate_register("", ""));
        assert_eq!(error.field, "username");
    }

    #[test]
    fn test_login_empty_username() {
        let error = single_error(validate_login("", "secret"));
        assert_eq!(error.field, "username");
        assert_eq!(error.message, "Please enter a username");
    }

    #[test]
    fn test_login_empty_password() {
        let error = single_error(validate_login("bob", ""));
        assert_eq!(error.field, "password");
        assert_eq!(error.message, "Please enter a password");
    }

    #[test]
    fn test_login_valid() {
        assert!(validate_login("bob", "x").is_none());
    }

    #[test]
    fn test_post_empty_title() {
        let error = single_error(validate_post("", "body"));
        assert_eq!(error.field, "title");
        assert_eq!(error.message, "Enter a title");
    }

    #[test]
    fn test_post_empty_body() {
        let error = single_error(validate_post("title", ""));
        assert_eq!(error.field, "body");
        assert_eq!(error.message, "Body cannot be left empty");
    }

    #[test]
    fn test_post_valid() {
        assert!(validate_post("title", "body").is_none());
    }
}
