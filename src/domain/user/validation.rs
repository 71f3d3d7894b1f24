//! Input sanitization and shape checks for registration fields

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// `local@domain.tld`, where no part contains whitespace or `@`
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Errors that can occur during user validation
///
/// The display strings are part of the public API contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Invalid name")]
    InvalidName,

    #[error("Invalid email")]
    InvalidEmail,
}

/// Trim surrounding whitespace, then drop every `<` and `>`
pub fn sanitize_input(input: &str) -> String {
    input.trim().replace(['<', '>'], "")
}

/// A name is valid when something other than whitespace remains
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@example"));
        assert!(!is_valid_email("te st@example.com"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_valid_name() {
        assert!(is_valid_name("John Doe"));
        assert!(is_valid_name("x"));
    }

    #[test]
    fn test_invalid_name() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("\t\n"));
    }

    #[test]
    fn test_sanitize_removes_angle_brackets() {
        assert_eq!(sanitize_input("<script>"), "script");
        assert_eq!(sanitize_input("  <John>  "), "John");
        assert_eq!(sanitize_input("a<b>c"), "abc");
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize_input("  hello  "), "hello");
    }

    #[test]
    fn test_sanitize_trims_before_stripping() {
        // Whitespace exposed by stripping brackets stays
        assert_eq!(sanitize_input("< John >"), " John ");
    }

    #[test]
    fn test_sanitize_leaves_other_characters() {
        assert_eq!(sanitize_input("O'Brien & Sons"), "O'Brien & Sons");
        assert_eq!(sanitize_input("MiXeD@Case.COM"), "MiXeD@Case.COM");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(UserValidationError::InvalidName.to_string(), "Invalid name");
        assert_eq!(UserValidationError::InvalidEmail.to_string(), "Invalid email");
    }
}
