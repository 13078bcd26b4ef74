//! Field validators shared by the forms and the account service.

use thiserror::Error;

/// Length of a driver license number: three letters followed by five digits.
pub const LICENSE_NUMBER_LENGTH: usize = 8;
const LICENSE_PREFIX_LENGTH: usize = 3;

/// Maximum username length, matching the account table column.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseNumberError {
    #[error("License number should consist of {LICENSE_NUMBER_LENGTH} characters")]
    Length,

    #[error("First 3 characters should be uppercase letters")]
    Prefix,

    #[error("Last 5 characters should be digits")]
    Digits,
}

/// ## Summary
/// Validates a license number such as `QWE12345`.
///
/// ## Errors
/// Returns the first rule the value breaks: overall length, then the
/// uppercase prefix, then the digit suffix.
pub fn validate_license_number(value: &str) -> Result<(), LicenseNumberError> {
    if value.chars().count() != LICENSE_NUMBER_LENGTH {
        return Err(LicenseNumberError::Length);
    }

    let mut chars = value.chars();

    if !chars
        .by_ref()
        .take(LICENSE_PREFIX_LENGTH)
        .all(|c| c.is_ascii_uppercase())
    {
        return Err(LicenseNumberError::Prefix);
    }

    if !chars.all(|c| c.is_ascii_digit()) {
        return Err(LicenseNumberError::Digits);
    }

    Ok(())
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameError {
    #[error("This field is required.")]
    Empty,

    #[error("Ensure this value has at most {USERNAME_MAX_LENGTH} characters.")]
    TooLong,

    #[error(
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
    )]
    InvalidCharacters,
}

/// ## Summary
/// Validates a username: letters, digits and `@.+-_`, at most 150 characters.
///
/// ## Errors
/// Returns which rule the username breaks.
pub fn validate_username(value: &str) -> Result<(), UsernameError> {
    if value.is_empty() {
        return Err(UsernameError::Empty);
    }
    if value.chars().count() > USERNAME_MAX_LENGTH {
        return Err(UsernameError::TooLong);
    }
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(UsernameError::InvalidCharacters);
    }
    Ok(())
}
