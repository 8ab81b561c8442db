//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::entity::User;

/// Letters joined by single separators; `,` and `.` may be followed by one space
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+(([,.] ?|[ '-])[A-Za-z]+)*$").unwrap());

/// ASCII local-part@domain.tld in either case
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,4}$").unwrap()
});

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Name contains characters that are not allowed")]
    InvalidName,

    #[error("Last name contains characters that are not allowed")]
    InvalidLastName,

    #[error("Email address is not valid")]
    InvalidEmail,
}

impl UserValidationError {
    /// Name of the request field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidName => "name",
            Self::InvalidLastName => "last_name",
            Self::InvalidEmail => "email",
        }
    }
}

/// Build a validated user from raw input.
///
/// Checks run in order: missing fields, email, name, last name. On success
/// `name`, `last_name` and `email` are lower-cased and `id` is kept verbatim.
pub fn validate_user(
    id: &str,
    name: &str,
    last_name: &str,
    email: &str,
) -> Result<User, UserValidationError> {
    for (field, value) in [
        ("id", id),
        ("name", name),
        ("last_name", last_name),
        ("email", email),
    ] {
        if value.is_empty() {
            return Err(UserValidationError::MissingField(field));
        }
    }

    if !is_valid_email(email) {
        return Err(UserValidationError::InvalidEmail);
    }

    if !is_valid_name(name) {
        return Err(UserValidationError::InvalidName);
    }

    if !is_valid_name(last_name) {
        return Err(UserValidationError::InvalidLastName);
    }

    Ok(User::from_parts(
        id,
        name.to_lowercase(),
        last_name.to_lowercase(),
        email.to_lowercase(),
    ))
}

/// Check the fields supplied for a partial update.
///
/// Empty fields were not supplied and are skipped. The others are checked in
/// the same order as [`validate_user`]: email, name, last name.
pub fn validate_details(
    name: &str,
    last_name: &str,
    email: &str,
) -> Result<(), UserValidationError> {
    if !email.is_empty() && !is_valid_email(email) {
        return Err(UserValidationError::InvalidEmail);
    }

    if !name.is_empty() && !is_valid_name(name) {
        return Err(UserValidationError::InvalidName);
    }

    if !last_name.is_empty() && !is_valid_name(last_name) {
        return Err(UserValidationError::InvalidLastName);
    }

    Ok(())
}

/// Check a value against the human name grammar
pub fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

/// Check a value against the email address shape
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_is_normalized() {
        let user = validate_user("User-ID-1", "John", "Doe", "John.Doe@Example.com").unwrap();

        assert_eq!(user.id(), "User-ID-1");
        assert_eq!(user.name(), "john");
        assert_eq!(user.last_name(), "doe");
        assert_eq!(user.email(), "john.doe@example.com");
    }

    #[test]
    fn test_already_normalized_input_is_unchanged() {
        let user = validate_user("test-id", "test-name", "test-lastname", "test@test.com").unwrap();

        assert_eq!(user.name(), "test-name");
        assert_eq!(user.last_name(), "test-lastname");
        assert_eq!(user.email(), "test@test.com");
    }

    #[test]
    fn test_validation_is_deterministic() {
        let first = validate_user("x", "Anne", "O'Neil", "anne@site.org");
        let second = validate_user("x", "Anne", "O'Neil", "anne@site.org");
        assert_eq!(first, second);

        let first = validate_user("x", "Anne2", "O'Neil", "anne@site.org");
        let second = validate_user("x", "Anne2", "O'Neil", "anne@site.org");
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_user("", "John", "Doe", "a@b.com"),
            Err(UserValidationError::MissingField("id"))
        );
        assert_eq!(
            validate_user("x", "", "Doe", "a@b.com"),
            Err(UserValidationError::MissingField("name"))
        );
        assert_eq!(
            validate_user("x", "John", "", "a@b.com"),
            Err(UserValidationError::MissingField("last_name"))
        );
        assert_eq!(
            validate_user("x", "John", "Doe", ""),
            Err(UserValidationError::MissingField("email"))
        );
    }

    #[test]
    fn test_missing_field_wins_over_invalid_field() {
        assert_eq!(
            validate_user("x", "John2", "", "not-an-email"),
            Err(UserValidationError::MissingField("last_name"))
        );
    }

    #[test]
    fn test_name_with_digit() {
        assert_eq!(
            validate_user("x", "John2", "Doe", "a@b.com"),
            Err(UserValidationError::InvalidName)
        );
    }

    #[test]
    fn test_invalid_last_name() {
        assert_eq!(
            validate_user("x", "John", "2222", "a@b.com"),
            Err(UserValidationError::InvalidLastName)
        );
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            validate_user("x", "John", "Doe", "not-an-email"),
            Err(UserValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_email_checked_before_names() {
        assert_eq!(
            validate_user("x", "John2", "Doe", "test"),
            Err(UserValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("John"));
        assert!(is_valid_name("Mary-Jane"));
        assert!(is_valid_name("O'Neil"));
        assert!(is_valid_name("Van Der Berg"));
        assert!(is_valid_name("St. John"));
        assert!(is_valid_name("J.R"));
        assert!(is_valid_name("Smith, Jr"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("-John"));
        assert!(!is_valid_name("John-"));
        assert!(!is_valid_name("John."));
        assert!(!is_valid_name("Mary--Jane"));
        assert!(!is_valid_name("Mary  Jane"));
        assert!(!is_valid_name("John_Doe"));
        assert!(!is_valid_name("J0hn"));
        assert!(!is_valid_name("Jöhn"));
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(is_valid_email("USER@EXAMPLE.COM"));
        assert!(is_valid_email("c@d.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("\u{17F}am@b.com"));
        assert!(!is_valid_email("\u{212A}im@b.com"));
        assert!(!is_valid_email("kim@b.\u{212A}om"));
    }

    #[test]
    fn test_non_ascii_email_is_rejected_by_validator() {
        assert_eq!(
            validate_user("x", "Sam", "Doe", "\u{17F}am@b.com"),
            Err(UserValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_validate_details_skips_empty_fields() {
        assert_eq!(validate_details("", "", ""), Ok(()));
        assert_eq!(validate_details("Jane", "", ""), Ok(()));
        assert_eq!(
            validate_details("Jane", "R0e", ""),
            Err(UserValidationError::InvalidLastName)
        );
        assert_eq!(
            validate_details("Jane2", "", "broken"),
            Err(UserValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_error_field_names() {
        assert_eq!(UserValidationError::MissingField("id").field(), "id");
        assert_eq!(UserValidationError::InvalidName.field(), "name");
        assert_eq!(UserValidationError::InvalidLastName.field(), "last_name");
        assert_eq!(UserValidationError::InvalidEmail.field(), "email");
    }
}
