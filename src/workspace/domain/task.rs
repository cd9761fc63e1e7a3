//! Board task aggregate.

use super::{PhaseId, Priority, ProjectId, TaskId};
use crate::planning::{DateWindow, StatusColumn, TaskPlacement};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A unit of work on the kanban board and the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    phase_id: PhaseId,
    title: String,
    description: Option<String>,
    status_column: StatusColumn,
    priority: Priority,
    schedule: DateWindow,
    column_order: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated field values for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Owning project.
    pub project_id: ProjectId,
    /// Phase the task belongs to.
    pub phase_id: PhaseId,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Initial column.
    pub status_column: StatusColumn,
    /// Priority.
    pub priority: Priority,
    /// Planned start and end dates.
    pub schedule: DateWindow,
    /// Initial rank within the column.
    pub column_order: u32,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Phase the task belongs to.
    pub phase_id: PhaseId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted column.
    pub status_column: StatusColumn,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted start and end dates.
    pub schedule: DateWindow,
    /// Persisted rank within the column.
    pub column_order: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task from validated draft values.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: draft.project_id,
            phase_id: draft.phase_id,
            title: draft.title,
            description: draft.description,
            status_column: draft.status_column,
            priority: draft.priority,
            schedule: draft.schedule,
            column_order: draft.column_order,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            phase_id: data.phase_id,
            title: data.title,
            description: data.description,
            status_column: data.status_column,
            priority: data.priority,
            schedule: data.schedule,
            column_order: data.column_order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the phase the task belongs to.
    #[must_use]
    pub const fn phase_id(&self) -> PhaseId {
        self.phase_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current column.
    #[must_use]
    pub const fn status_column(&self) -> StatusColumn {
        self.status_column
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the planned start and end dates.
    #[must_use]
    pub const fn schedule(&self) -> DateWindow {
        self.schedule
    }

    /// Returns the rank within the current column.
    #[must_use]
    pub const fn column_order(&self) -> u32 {
        self.column_order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Projects the task onto its board placement.
    #[must_use]
    pub const fn placement(&self) -> TaskPlacement<TaskId> {
        TaskPlacement::new(self.id, self.status_column, self.column_order)
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Moves the task to another phase.
    pub const fn assign_phase(&mut self, phase_id: PhaseId) {
        self.phase_id = phase_id;
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Replaces the planned dates.
    pub const fn reschedule(&mut self, schedule: DateWindow) {
        self.schedule = schedule;
    }

    /// Places the task at `column_order` within `status_column`.
    pub const fn place(&mut self, status_column: StatusColumn, column_order: u32) {
        self.status_column = status_column;
        self.column_order = column_order;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
