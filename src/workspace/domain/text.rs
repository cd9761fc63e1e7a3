//! Bounded free-text validation shared by the workspace aggregates.

use super::WorkspaceDomainError;

/// Trims `value` and checks it is non-empty and at most `max` characters.
///
/// # Errors
///
/// Returns [`WorkspaceDomainError::EmptyText`] when nothing remains after
/// trimming, or [`WorkspaceDomainError::TextTooLong`] when the trimmed value
/// has more than `max` characters.
pub fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, WorkspaceDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorkspaceDomainError::EmptyText { field });
    }
    if trimmed.chars().count() > max {
        return Err(WorkspaceDomainError::TextTooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Checks an optional description against `max` characters.
///
/// Blank descriptions collapse to `None`.
///
/// # Errors
///
/// Returns [`WorkspaceDomainError::TextTooLong`] when the value has more than
/// `max` characters.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, WorkspaceDomainError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    if raw.chars().count() > max {
        return Err(WorkspaceDomainError::TextTooLong { field, max });
    }
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(raw.to_owned()))
}
