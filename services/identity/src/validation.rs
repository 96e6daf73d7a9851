//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Longest password accepted, in bytes
const MAX_PASSWORD_LEN: usize = 1024;

/// Validate the credentials presented at registration
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }

    validate_email(email)?;

    if password.len() > MAX_PASSWORD_LEN {
        return Err(format!(
            "Password must be at most {} characters long",
            MAX_PASSWORD_LEN
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_required() {
        let expected = Err("Email and password are required".to_string());
        assert_eq!(validate_credentials("", "secret123"), expected);
        assert_eq!(validate_credentials("alice@x.com", ""), expected);
        assert_eq!(validate_credentials("", ""), expected);
    }

    #[test]
    fn test_accepts_plain_credentials() {
        assert_eq!(validate_credentials("alice@x.com", "secret123"), Ok(()));
    }

    #[test]
    fn test_rejects_malformed_email() {
        for email in ["alice", "alice@", "@x.com", "alice@x", "a b@x.com"] {
            assert!(validate_email(email).is_err(), "{email}");
        }
    }

    #[test]
    fn test_rejects_oversized_input() {
        let long_email = format!("{}@x.com", "a".repeat(250));
        assert!(validate_credentials(&long_email, "secret123").is_err());

        let long_password = "p".repeat(MAX_PASSWORD_LEN + 1);
        assert!(validate_credentials("alice@x.com", &long_password).is_err());
    }
}
