// ── Form validation ──
//
// Checks run before any backend call on the register, password-reset and
// account-settings flows. Each returns `CoreError::ValidationFailed` with a user-facing
// message.

use crate::error::CoreError;

pub const MIN_PASSWORD_LEN: usize = 8;

fn invalid(message: &str) -> CoreError {
    CoreError::ValidationFailed {
        message: message.to_owned(),
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid("please enter a valid email address"));
    };

    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || !has_inner_dot
    {
        return Err(invalid("please enter a valid email address"));
    }
    Ok(())
}

pub fn validate_password_match(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(invalid("the two passwords do not match"))
    }
}

/// At least eight ASCII letters or digits, with one of each.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    let alphanumeric = password.chars().all(|c| c.is_ascii_alphanumeric());
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if password.len() >= MIN_PASSWORD_LEN && alphanumeric && has_letter && has_digit {
        Ok(())
    } else {
        Err(invalid(
            "password must be at least 8 characters and contain both letters and digits",
        ))
    }
}

pub fn validate_reset_code(code: &str) -> Result<(), CoreError> {
    if code.trim().is_empty() {
        Err(invalid("please enter the verification code"))
    } else {
        Ok(())
    }
}

pub fn validate_display_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        Err(invalid("display name cannot be empty"))
    } else {
        Ok(())
    }
}

/// Change-password form: current password given, confirmation matches,
/// new password differs from the current one and is strong enough.
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirmation: &str,
) -> Result<(), CoreError> {
    if current.is_empty() {
        return Err(invalid("please enter the current password"));
    }
    validate_password_match(new, confirmation)?;
    if new == current {
        return Err(invalid("new password must differ from the current one"));
    }
    validate_password_strength(new)
}
