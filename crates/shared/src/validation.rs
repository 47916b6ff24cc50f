//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Minimum length of feedback text after trimming.
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// Maximum length of feedback text after trimming.
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// Minimum length of a submitter name after trimming.
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length of a submitter name or email address.
pub const MAX_FIELD_LENGTH: usize = 255;

lazy_static! {
    /// Standard address pattern: local part, `@`, domain with at least one dot.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
            .expect("email regex is valid");
}

/// Returns true if the value matches a standard email address pattern.
pub fn is_valid_email(value: &str) -> bool {
    value.len() <= MAX_FIELD_LENGTH && EMAIL_REGEX.is_match(value)
}

/// Validates that a value is a well-formed email address or empty.
///
/// Used for the `notification_email` setting, where an empty string means
/// "fall back to the configured sender address".
pub fn validate_email_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_valid_email(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("The notification email must be a valid email address".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email_accepts_common_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
        assert!(is_valid_email("USER_99@example.io"));
    }

    #[test]
    fn test_is_valid_email_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@domain"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example.com extra"));
    }

    #[test]
    fn test_is_valid_email_rejects_oversized_addresses() {
        let local = "a".repeat(MAX_FIELD_LENGTH);
        assert!(!is_valid_email(&format!("{}@example.com", local)));
    }

    #[test]
    fn test_validate_email_or_empty() {
        assert!(validate_email_or_empty("").is_ok());
        assert!(validate_email_or_empty("admin@example.com").is_ok());
        assert!(validate_email_or_empty("nope").is_err());
    }

    #[test]
    fn test_validate_email_or_empty_error_message() {
        let err = validate_email_or_empty("nope").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "The notification email must be a valid email address"
        );
    }
}
