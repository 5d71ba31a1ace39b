use std::fmt;

/// Characters accepted as the required special character.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%&*()-+=^";

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 15;

pub const PASSWORD_REQUIREMENTS_TEXT: &str = "Password must be 8-15 chars, include 1 digit, 1 uppercase, 1 lowercase, 1 special char (!@#$%&*()-+=^), and no spaces.";

/// First rule a password breaks. Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    Missing,
    Length,
    Whitespace,
    NoDigit,
    NoUppercase,
    NoLowercase,
    NoSpecial,
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PasswordError::Missing => "Password is required",
            PasswordError::Length => "Password must be 8-15 characters long",
            PasswordError::Whitespace => "Password must not contain any whitespace",
            PasswordError::NoDigit => "Password must contain at least one digit",
            PasswordError::NoUppercase => "Password must contain at least one uppercase letter",
            PasswordError::NoLowercase => "Password must contain at least one lowercase letter",
            PasswordError::NoSpecial => {
                "Password must contain at least one special character (!@#$%&*()-+=^)"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for PasswordError {}

/// Check a password against the registration policy.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Missing);
    }
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(PasswordError::Length);
    }
    if password.chars().any(char::is_whitespace) {
        return Err(PasswordError::Whitespace);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::NoDigit);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::NoUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordError::NoLowercase);
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err(PasswordError::NoSpecial);
    }
    Ok(())
}
