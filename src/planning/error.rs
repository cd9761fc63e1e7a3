//! Error types returned by the planning rules.

use thiserror::Error;

/// Error returned while computing a kanban reorder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReorderError<Id> {
    /// The moving task is not part of the supplied task set.
    #[error("task not found: {0}")]
    TaskNotFound(Id),
}

/// First rule broken by an ordered phase list.
///
/// `index` is zero-based; the rendered message numbers phases from one.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SequenceViolation {
    /// The phase starts after it ends.
    #[error("Phase {} has start date after end date", .index + 1)]
    StartAfterEnd {
        /// Zero-based position of the offending phase.
        index: usize,
    },

    /// The phase starts on or before the previous phase's end date.
    #[error("Phase {} overlaps or touches previous phase", .index + 1)]
    OverlapsPrevious {
        /// Zero-based position of the offending phase.
        index: usize,
    },
}

impl SequenceViolation {
    /// Returns the zero-based index of the offending phase.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::StartAfterEnd { index } | Self::OverlapsPrevious { index } => index,
        }
    }
}

/// Rule broken by a task date range.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum WindowViolation {
    /// The task starts after it ends.
    #[error("Task start date must be before or equal to end date")]
    StartAfterEnd,

    /// The task begins before or ends after the permitted window.
    #[error("Task dates must be within project date range")]
    OutsideWindow,
}

/// Error returned while parsing an ISO 8601 calendar date.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid date '{0}', expected YYYY-MM-DD")]
pub struct InvalidIsoDate(pub String);

/// Error returned while parsing a status column from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status column: {0}")]
pub struct ParseStatusColumnError(pub String);
