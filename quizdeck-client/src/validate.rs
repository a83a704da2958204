//! Form validators, shared by the presentation boundary and the service
//! layer. The service layer re-checks game fields so a caller that bypasses
//! a form is still rejected before anything reaches the network.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// A simple "local@domain.tld" shape, intentionally not full RFC compliance
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref GAME_CODE_REGEX: Regex = Regex::new(r"^[A-Z0-9]{4,12}$").unwrap();
}

/// Longest display name accepted at registration.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A field that failed validation. The messages are suitable for field-level
/// display as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Enter a valid email")]
    EmailFormat,
    #[error("Display name is required")]
    DisplayNameRequired,
    #[error("Display name must be 50 characters or fewer")]
    DisplayNameTooLong,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Confirm password is required")]
    PasswordConfirmRequired,
    #[error("Passwords must match")]
    PasswordMismatch,
    #[error("Game name is required")]
    GameNameRequired,
    #[error("Game code must be 4-12 uppercase letters and numbers only")]
    GameCodeFormat,
}

pub fn email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmailRequired);
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::EmailFormat);
    }

    Ok(())
}

pub fn display_name(display_name: &str) -> Result<(), ValidationError> {
    let trimmed = display_name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::DisplayNameRequired);
    }

    if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(ValidationError::DisplayNameTooLong);
    }

    Ok(())
}

pub fn password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(())
}

pub fn password_confirm(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if confirm.is_empty() {
        return Err(ValidationError::PasswordConfirmRequired);
    }

    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

pub fn game_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::GameNameRequired);
    }

    Ok(())
}

pub fn game_code(code: &str) -> Result<(), ValidationError> {
    if !GAME_CODE_REGEX.is_match(code) {
        return Err(ValidationError::GameCodeFormat);
    }

    Ok(())
}
