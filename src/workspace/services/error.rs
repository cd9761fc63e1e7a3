//! Service-level errors for workspace operations.

use crate::planning::{ReorderError, SequenceViolation, WindowViolation};
use crate::workspace::{
    domain::{DeliverableId, OwnerId, PhaseId, TaskId, WorkspaceDomainError},
    ports::WorkspaceRepositoryError,
};
use thiserror::Error;

/// Service-level errors for workspace operations.
#[derive(Debug, Error)]
pub enum WorkspaceServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] WorkspaceDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkspaceRepositoryError),
    /// The reorder engine rejected the move.
    #[error(transparent)]
    Reorder(#[from] ReorderError<TaskId>),
    /// The phase schedule is not a valid sequence.
    #[error(transparent)]
    Sequence(#[from] SequenceViolation),
    /// Task dates do not fit their window.
    #[error(transparent)]
    Window(#[from] WindowViolation),
    /// The owner has no project yet.
    #[error("no project for owner {0}; run bootstrap first")]
    ProjectNotFound(OwnerId),
    /// The phase does not belong to the owner's project.
    #[error("phase not found: {0}")]
    PhaseNotFound(PhaseId),
    /// The task does not belong to the owner's project.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The deliverable does not belong to the owner's project.
    #[error("deliverable not found: {0}")]
    DeliverableNotFound(DeliverableId),
    /// A schedule update did not list every existing phase exactly once.
    #[error("phase schedule must list every existing phase exactly once")]
    PhaseMismatch,
    /// The project has no phases to schedule against.
    #[error("project has no phases")]
    NoPhases,
    /// An existing task would fall outside the new project window.
    #[error("task '{title}' falls outside the new project schedule")]
    TaskOutsideSchedule {
        /// Title of the first task that no longer fits.
        title: String,
    },
}

/// Result type for workspace service operations.
pub type WorkspaceServiceResult<T> = Result<T, WorkspaceServiceError>;
