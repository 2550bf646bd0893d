//! # Validation Utilities
//!
//! Input validation helpers.

use regex::Regex;
use std::sync::LazyLock;

/// Unanchored `local@domain.tld` shape, the same check the frontend runs.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Validate email format (basic shape check).
///
/// Accepts any input containing `local@domain.tld` where every part is a
/// non-empty run of non-whitespace characters.
pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in ["a@b.com", "user+tag@example.com", "first.last@sub.domain.org", "x@y.z"] {
            assert!(validate_email(email).is_ok(), "{email} should be accepted");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "plainaddress", "@b.com", "a@", "a@b", "a@.com", "a@b.", "a @b.com", "a@ b.com", "a@b\t.com"] {
            assert_eq!(
                validate_email(email),
                Err("Invalid email format".to_string()),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_any_matching_at_sign_is_enough() {
        // Same as the unanchored pattern: a later '@' may complete the shape.
        assert!(validate_email("@@x.y").is_ok());
        assert!(validate_email("bad@ good@b.com").is_ok());
    }
}
