//! Registration input validation
//!
//! Pure checks with no side effects; every message is user-facing verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur while validating registration input.
///
/// Registration collects every applicable variant rather than stopping at
/// the first, so the caller sees a complete error list in one pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username is required")]
    UsernameRequired,

    #[error("Username must be at least {MIN_USERNAME_LENGTH} characters long")]
    UsernameTooShort,

    #[error("Username must not exceed {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    #[error("Username can only contain letters, numbers, and underscores")]
    UsernameInvalidCharacter,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    EmailInvalid,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    PasswordTooShort,

    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    PasswordMissingLowercase,

    #[error("Password must contain at least one digit")]
    PasswordMissingDigit,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailRegistered,
}

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 20;
const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Validate a username
///
/// Rules:
/// - Cannot be empty or blank
/// - Length within [3, 20]
/// - Only letters, digits, and underscores
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameRequired);
    }

    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError::UsernameInvalidCharacter);
    }

    Ok(())
}

/// Validate email address syntax
///
/// Matching is case-insensitive; callers normalize to lowercase before
/// storage and comparison.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }

    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::EmailInvalid);
    }

    Ok(())
}

/// Validate password strength, returning every violation
///
/// Rules (all checked, all reported):
/// - Minimum 8 characters
/// - At least one uppercase letter
/// - At least one lowercase letter
/// - At least one digit
pub fn validate_password_strength(password: &str) -> Vec<ValidationError> {
    if password.is_empty() {
        return vec![ValidationError::PasswordRequired];
    }

    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(ValidationError::PasswordTooShort);
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(ValidationError::PasswordMissingUppercase);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(ValidationError::PasswordMissingLowercase);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(ValidationError::PasswordMissingDigit);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    // Username tests

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("bob").is_ok());
        assert!(validate_username("alice_123").is_ok());
        assert!(validate_username("User_Name").is_ok());
        assert!(validate_username("a".repeat(20).as_str()).is_ok());
    }

    #[test]
    fn test_blank_username() {
        assert_eq!(validate_username(""), Err(ValidationError::UsernameRequired));
        assert_eq!(
            validate_username("   "),
            Err(ValidationError::UsernameRequired)
        );
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab"),
            Err(ValidationError::UsernameTooShort)
        );
    }

    #[test]
    fn test_username_too_long() {
        let long = "a".repeat(21);
        assert_eq!(
            validate_username(&long),
            Err(ValidationError::UsernameTooLong)
        );
    }

    #[test]
    fn test_username_invalid_characters() {
        assert_eq!(
            validate_username("user-name"),
            Err(ValidationError::UsernameInvalidCharacter)
        );
        assert_eq!(
            validate_username("user name"),
            Err(ValidationError::UsernameInvalidCharacter)
        );
        assert_eq!(
            validate_username("user@name"),
            Err(ValidationError::UsernameInvalidCharacter)
        );
    }

    // Email tests

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("alice@x.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("UPPER@EXAMPLE.COM").is_ok());
    }

    #[test]
    fn test_blank_email() {
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
        assert_eq!(validate_email("  "), Err(ValidationError::EmailRequired));
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(ValidationError::EmailInvalid)
        );
        assert_eq!(validate_email("a@b"), Err(ValidationError::EmailInvalid));
        assert_eq!(
            validate_email("two@@example.com"),
            Err(ValidationError::EmailInvalid)
        );
        assert_eq!(
            validate_email("space in@example.com"),
            Err(ValidationError::EmailInvalid)
        );
    }

    // Password tests

    #[test]
    fn test_strong_password() {
        assert!(validate_password_strength("Passw0rd").is_empty());
        assert!(validate_password_strength("Longer Passphrase 1").is_empty());
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(
            validate_password_strength(""),
            vec![ValidationError::PasswordRequired]
        );
    }

    #[test]
    fn test_short_password_reports_every_violation() {
        // "short1" is under 8 characters and has no uppercase letter;
        // both violations are reported together.
        let violations = validate_password_strength("short1");
        assert!(violations.contains(&ValidationError::PasswordTooShort));
        assert!(violations.contains(&ValidationError::PasswordMissingUppercase));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_password_missing_classes() {
        assert_eq!(
            validate_password_strength("alllowercase1"),
            vec![ValidationError::PasswordMissingUppercase]
        );
        assert_eq!(
            validate_password_strength("ALLUPPERCASE1"),
            vec![ValidationError::PasswordMissingLowercase]
        );
        assert_eq!(
            validate_password_strength("NoDigitsHere"),
            vec![ValidationError::PasswordMissingDigit]
        );
    }

    #[test]
    fn test_validation_is_deterministic() {
        assert_eq!(
            validate_password_strength("short1"),
            validate_password_strength("short1")
        );
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ValidationError::UsernameTooShort.to_string(),
            "Username must be at least 3 characters long"
        );
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters long"
        );
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }
}
