//! Phase sequence validation.

use super::{DateWindow, SequenceViolation};

/// Checks that ordered phases partition time without overlap.
///
/// Every phase must satisfy `start <= end`, and each phase must start strictly
/// after the previous one ends; a phase starting on the day the previous one
/// ends counts as overlapping. Phases are checked in index order and the first
/// broken rule is returned. An empty list is valid.
///
/// # Errors
///
/// Returns the first [`SequenceViolation`] found.
///
/// # Examples
///
/// ```
/// use phaseboard::planning::{DateWindow, SequenceViolation, validate_sequence};
///
/// let phases = [
///     DateWindow::parse("2026-02-01", "2026-02-28").expect("valid dates"),
///     DateWindow::parse("2026-02-20", "2026-03-10").expect("valid dates"),
/// ];
/// assert_eq!(
///     validate_sequence(&phases),
///     Err(SequenceViolation::OverlapsPrevious { index: 1 })
/// );
/// ```
pub fn validate_sequence(phases: &[DateWindow]) -> Result<(), SequenceViolation> {
    let mut previous_end = None;
    for (index, phase) in phases.iter().enumerate() {
        if phase.start_date() > phase.end_date() {
            return Err(SequenceViolation::StartAfterEnd { index });
        }
        if previous_end.is_some_and(|end| phase.start_date() <= end) {
            return Err(SequenceViolation::OverlapsPrevious { index });
        }
        previous_end = Some(phase.end_date());
    }
    Ok(())
}

/// Returns the window spanning from the first phase's start to the last
/// phase's end, or `None` for an empty sequence.
///
/// Only meaningful for a sequence that passed [`validate_sequence`].
#[must_use]
pub fn sequence_span(phases: &[DateWindow]) -> Option<DateWindow> {
    let first = phases.first()?;
    let last = phases.last()?;
    Some(DateWindow::new(first.start_date(), last.end_date()))
}
