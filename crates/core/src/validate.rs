//! Client-side field validation.
//!
//! These checks run before any network call; a failed check is reported in
//! place and never reaches the backend.

use crate::error::{DomainError, DomainResult};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A required field must contain at least one non-whitespace character.
pub fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Minimal email shape check: one `@` with a dot somewhere after it.
/// The backend remains the authority on deliverability.
pub fn check_email_shape(email: &str) -> DomainResult<()> {
    let email = email.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'));
    if valid {
        Ok(())
    } else {
        Err(DomainError::validation("email address is not valid"))
    }
}

/// Password complexity: length floor only, as enforced by the UI.
pub fn check_password_complexity(password: &str) -> DomainResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )))
    } else {
        Ok(())
    }
}

/// Password and its confirmation must match exactly.
pub fn check_password_confirmation(password: &str, confirmation: &str) -> DomainResult<()> {
    if password == confirmation {
        Ok(())
    } else {
        Err(DomainError::validation("passwords do not match"))
    }
}
