//! Field-level validation helpers shared by the create/update handlers.

use validator::{ValidateEmail, ValidationError};

use crate::error::CoreError;

/// Maximum entries in a tag / feature / country list.
pub const MAX_LIST_ENTRIES: usize = 50;

/// Maximum length of a single list entry.
pub const MAX_LIST_ENTRY_LENGTH: usize = 100;

/// Trim a required text field, rejecting it when nothing is left or it is
/// longer than `max_len` characters. Returns the trimmed value to store.
pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// `#[validate(custom(function = "not_blank"))]` hook for DTO text fields:
/// `length(min = 1)` alone accepts `"   "`.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

pub fn validate_email(field: &str, value: &str) -> Result<(), CoreError> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} is not a valid email address"
        )))
    }
}

/// ISO 4217 style code: three uppercase ASCII letters.
pub fn validate_currency(code: &str) -> Result<(), CoreError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid currency '{code}'. Expected a three-letter code such as USD"
        )))
    }
}

/// Trim entries, drop blanks and duplicates, and enforce list limits.
///
/// Order of first appearance is preserved.
pub fn normalize_string_list(field: &str, values: &[String]) -> Result<Vec<String>, CoreError> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.chars().count() > MAX_LIST_ENTRY_LENGTH {
            return Err(CoreError::Validation(format!(
                "{field} entries must be at most {MAX_LIST_ENTRY_LENGTH} characters"
            )));
        }
        if !out.iter().any(|existing| existing.eq_ignore_ascii_case(trimmed)) {
            out.push(trimmed.to_string());
        }
    }
    if out.len() > MAX_LIST_ENTRIES {
        return Err(CoreError::Validation(format!(
            "{field} may contain at most {MAX_LIST_ENTRIES} entries"
        )));
    }
    Ok(out)
}

/// Blank optional strings are stored as NULL.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
