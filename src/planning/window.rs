//! Task date window validation.

use super::{DateWindow, IsoDate, WindowViolation};

/// Checks that a task's date range is well formed and nests inside `window`.
///
/// # Errors
///
/// Returns [`WindowViolation::StartAfterEnd`] when `start_at > end_at`, or
/// [`WindowViolation::OutsideWindow`] when the task begins before the window
/// opens or ends after it closes.
pub fn validate_task_window(
    window: &DateWindow,
    start_at: IsoDate,
    end_at: IsoDate,
) -> Result<(), WindowViolation> {
    if start_at > end_at {
        return Err(WindowViolation::StartAfterEnd);
    }
    if start_at < window.start_date() || end_at > window.end_date() {
        return Err(WindowViolation::OutsideWindow);
    }
    Ok(())
}
