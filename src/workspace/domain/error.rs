//! Error types for workspace domain validation and parsing.

use crate::planning::{InvalidIsoDate, ParseStatusColumnError};
use thiserror::Error;

/// Errors returned while constructing workspace domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceDomainError {
    /// A required text field is empty after trimming.
    #[error("{field} must not be empty")]
    EmptyText {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A text field exceeds its configured length.
    #[error("{field} exceeds {max} character limit")]
    TextTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Configured maximum length in characters.
        max: usize,
    },

    /// A date is not in `YYYY-MM-DD` form.
    #[error(transparent)]
    InvalidDate(#[from] InvalidIsoDate),

    /// A status column string is unknown.
    #[error(transparent)]
    InvalidStatusColumn(#[from] ParseStatusColumnError),

    /// A priority string is unknown.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// A deliverable status string is unknown.
    #[error(transparent)]
    InvalidDeliverableStatus(#[from] ParseDeliverableStatusError),

    /// A project schedule must contain at least one phase.
    #[error("a project schedule needs at least one phase")]
    EmptySchedule,

    /// A resource link is not an absolute URL.
    #[error("invalid resource link '{0}', expected an absolute URL")]
    InvalidResourceLink(String),
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing deliverable statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown deliverable status: {0}")]
pub struct ParseDeliverableStatusError(pub String);
