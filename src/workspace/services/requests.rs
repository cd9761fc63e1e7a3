//! Request payloads accepted by [`super::WorkspaceService`].
//!
//! Dates arrive as `YYYY-MM-DD` text and free text arrives untrimmed; the
//! service validates both before touching the repository.

use crate::planning::StatusColumn;
use crate::workspace::domain::{DeliverableId, DeliverableStatus, PhaseId, Priority, TaskId};

/// Title and description patch for the project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<Option<String>>,
}

impl UpdateProjectRequest {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }
}

/// New name and dates for one existing phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseScheduleEntry {
    pub(crate) id: PhaseId,
    pub(crate) name: String,
    pub(crate) start_date: String,
    pub(crate) end_date: String,
}

impl PhaseScheduleEntry {
    /// Creates an entry for phase `id`.
    #[must_use]
    pub fn new(
        id: PhaseId,
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

/// Replacement schedule covering every existing phase of the project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePhasesRequest {
    pub(crate) phases: Vec<PhaseScheduleEntry>,
}

impl UpdatePhasesRequest {
    /// Creates a request from schedule entries in any order.
    #[must_use]
    pub fn new(phases: impl IntoIterator<Item = PhaseScheduleEntry>) -> Self {
        Self {
            phases: phases.into_iter().collect(),
        }
    }
}

/// Request payload for creating a board task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(crate) phase_id: PhaseId,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) status_column: StatusColumn,
    pub(crate) priority: Priority,
    pub(crate) start_at: String,
    pub(crate) end_at: String,
    pub(crate) deliverable_ids: Vec<DeliverableId>,
}

impl CreateTaskRequest {
    /// Creates a request with the mandatory task fields.
    ///
    /// The task lands in the `todo` column with `medium` priority unless
    /// overridden.
    #[must_use]
    pub fn new(
        phase_id: PhaseId,
        title: impl Into<String>,
        start_at: impl Into<String>,
        end_at: impl Into<String>,
    ) -> Self {
        Self {
            phase_id,
            title: title.into(),
            description: None,
            status_column: StatusColumn::default(),
            priority: Priority::default(),
            start_at: start_at.into(),
            end_at: end_at.into(),
            deliverable_ids: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial column.
    #[must_use]
    pub const fn with_status_column(mut self, status_column: StatusColumn) -> Self {
        self.status_column = status_column;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Links the task to deliverables on creation.
    #[must_use]
    pub fn with_deliverables(mut self, ids: impl IntoIterator<Item = DeliverableId>) -> Self {
        self.deliverable_ids = ids.into_iter().collect();
        self
    }
}

/// Partial update for a board task. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(crate) phase_id: Option<PhaseId>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<Option<String>>,
    pub(crate) status_column: Option<StatusColumn>,
    pub(crate) priority: Option<Priority>,
    pub(crate) start_at: Option<String>,
    pub(crate) end_at: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the task to another phase.
    #[must_use]
    pub const fn with_phase(mut self, phase_id: PhaseId) -> Self {
        self.phase_id = Some(phase_id);
        self
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Moves the task to the bottom of another column.
    #[must_use]
    pub const fn with_status_column(mut self, status_column: StatusColumn) -> Self {
        self.status_column = Some(status_column);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the start date.
    #[must_use]
    pub fn with_start_at(mut self, start_at: impl Into<String>) -> Self {
        self.start_at = Some(start_at.into());
        self
    }

    /// Replaces the end date.
    #[must_use]
    pub fn with_end_at(mut self, end_at: impl Into<String>) -> Self {
        self.end_at = Some(end_at.into());
        self
    }
}

/// Kanban move of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderTaskRequest {
    pub(crate) task_id: TaskId,
    pub(crate) target_column: StatusColumn,
    pub(crate) target_index: i64,
}

impl ReorderTaskRequest {
    /// Moves `task_id` to `target_index` within `target_column`.
    ///
    /// Out-of-range indices are clamped.
    #[must_use]
    pub const fn new(task_id: TaskId, target_column: StatusColumn, target_index: i64) -> Self {
        Self {
            task_id,
            target_column,
            target_index,
        }
    }
}

/// Request payload for creating a deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDeliverableRequest {
    pub(crate) title: String,
    pub(crate) phase_id: Option<PhaseId>,
    pub(crate) description: Option<String>,
    pub(crate) due_date: Option<String>,
    pub(crate) status: DeliverableStatus,
    pub(crate) resource_links: Vec<String>,
}

impl CreateDeliverableRequest {
    /// Creates a request with a title and no other details.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            phase_id: None,
            description: None,
            due_date: None,
            status: DeliverableStatus::default(),
            resource_links: Vec::new(),
        }
    }

    /// Attaches the deliverable to a phase.
    #[must_use]
    pub const fn with_phase(mut self, phase_id: PhaseId) -> Self {
        self.phase_id = Some(phase_id);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: DeliverableStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the resource links.
    #[must_use]
    pub fn with_resource_links(mut self, links: impl IntoIterator<Item = String>) -> Self {
        self.resource_links = links.into_iter().collect();
        self
    }
}

/// Partial update for a deliverable. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDeliverableRequest {
    pub(crate) title: Option<String>,
    pub(crate) phase_id: Option<Option<PhaseId>>,
    pub(crate) description: Option<Option<String>>,
    pub(crate) due_date: Option<Option<String>>,
    pub(crate) status: Option<DeliverableStatus>,
    pub(crate) resource_links: Option<Vec<String>>,
}

impl UpdateDeliverableRequest {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attaches the deliverable to a phase, or detaches it with `None`.
    #[must_use]
    pub const fn with_phase(mut self, phase_id: Option<PhaseId>) -> Self {
        self.phase_id = Some(phase_id);
        self
    }

    /// Replaces the description, or removes it with `None`.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the due date, or removes it with `None`.
    #[must_use]
    pub fn with_due_date(mut self, due_date: Option<String>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: DeliverableStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the resource links.
    #[must_use]
    pub fn with_resource_links(mut self, links: impl IntoIterator<Item = String>) -> Self {
        self.resource_links = Some(links.into_iter().collect());
        self
    }
}
