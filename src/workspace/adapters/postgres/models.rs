//! Diesel row models and domain conversions for workspace persistence.

use super::schema::{deliverables, phases, projects, task_deliverables, tasks};
use crate::planning::{DateWindow, IsoDate, StatusColumn};
use crate::workspace::{
    domain::{
        Deliverable, DeliverableId, DeliverableStatus, OwnerId, PersistedDeliverableData,
        PersistedPhaseData, PersistedProjectData, PersistedTaskData, Phase, PhaseId, Priority,
        Project, ProjectId, Task, TaskId, TaskLink,
    },
    ports::{WorkspaceRepositoryError, WorkspaceRepositoryResult},
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query and insert row for projects.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Project title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// First day of the project window.
    pub start_date: NaiveDate,
    /// Last day of the project window.
    pub end_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query and insert row for phases.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = phases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PhaseRow {
    /// Phase identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Position in the project sequence.
    pub order_index: i32,
    /// First day of the phase.
    pub start_date: NaiveDate,
    /// Last day of the phase.
    pub end_date: NaiveDate,
    /// Timeline colour token.
    pub color_token: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query and insert row for tasks.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Phase the task belongs to.
    pub phase_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Board column.
    pub status_column: String,
    /// Priority.
    pub priority: String,
    /// First scheduled day.
    pub start_at: NaiveDate,
    /// Last scheduled day.
    pub end_at: NaiveDate,
    /// Rank within the column.
    pub column_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert row for deliverables.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = deliverables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliverableRow {
    /// Deliverable identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Optional phase.
    pub phase_id: Option<uuid::Uuid>,
    /// Deliverable title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Status.
    pub status: String,
    /// Resource URLs as a JSON array.
    pub resource_links: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query and insert row for task links.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_deliverables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskLinkRow {
    /// Linked task.
    pub task_id: uuid::Uuid,
    /// Linked deliverable.
    pub deliverable_id: uuid::Uuid,
}

/// Converts a rank to its column representation.
pub fn rank_to_column(rank: u32) -> WorkspaceRepositoryResult<i32> {
    i32::try_from(rank).map_err(WorkspaceRepositoryError::persistence)
}

fn rank_from_column(value: i32) -> WorkspaceRepositoryResult<u32> {
    u32::try_from(value).map_err(WorkspaceRepositoryError::invalid_persisted_data)
}

const fn window_from_columns(start: NaiveDate, end: NaiveDate) -> DateWindow {
    DateWindow::new(IsoDate::from_naive(start), IsoDate::from_naive(end))
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            owner_id: project.owner_id().into_inner(),
            title: project.title().to_owned(),
            description: project.description().map(str::to_owned),
            start_date: project.window().start_date().as_naive(),
            end_date: project.window().end_date().as_naive(),
            created_at: project.created_at(),
        }
    }
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self::from_persisted(PersistedProjectData {
            id: ProjectId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            title: row.title,
            description: row.description,
            window: window_from_columns(row.start_date, row.end_date),
            created_at: row.created_at,
        })
    }
}

impl PhaseRow {
    /// Builds a row from a domain phase.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::Persistence`] when the order index
    /// does not fit the column type.
    pub fn from_domain(phase: &Phase) -> WorkspaceRepositoryResult<Self> {
        Ok(Self {
            id: phase.id().into_inner(),
            project_id: phase.project_id().into_inner(),
            name: phase.name().to_owned(),
            order_index: rank_to_column(phase.order_index())?,
            start_date: phase.window().start_date().as_naive(),
            end_date: phase.window().end_date().as_naive(),
            color_token: phase.color_token().to_owned(),
            created_at: phase.created_at(),
        })
    }

    /// Reconstructs the domain phase.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::InvalidPersistedData`] for a
    /// negative order index.
    pub fn into_domain(self) -> WorkspaceRepositoryResult<Phase> {
        Ok(Phase::from_persisted(PersistedPhaseData {
            id: PhaseId::from_uuid(self.id),
            project_id: ProjectId::from_uuid(self.project_id),
            name: self.name,
            order_index: rank_from_column(self.order_index)?,
            window: window_from_columns(self.start_date, self.end_date),
            color_token: self.color_token,
            created_at: self.created_at,
        }))
    }
}

impl TaskRow {
    /// Builds a row from a domain task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::Persistence`] when the column rank
    /// does not fit the column type.
    pub fn from_domain(task: &Task) -> WorkspaceRepositoryResult<Self> {
        Ok(Self {
            id: task.id().into_inner(),
            project_id: task.project_id().into_inner(),
            phase_id: task.phase_id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status_column: task.status_column().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            start_at: task.schedule().start_date().as_naive(),
            end_at: task.schedule().end_date().as_naive(),
            column_order: rank_to_column(task.column_order())?,
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        })
    }

    /// Reconstructs the domain task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::InvalidPersistedData`] for an
    /// unknown column or priority, or a negative rank.
    pub fn into_domain(self) -> WorkspaceRepositoryResult<Task> {
        let status_column = StatusColumn::try_from(self.status_column.as_str())
            .map_err(WorkspaceRepositoryError::invalid_persisted_data)?;
        let priority = Priority::try_from(self.priority.as_str())
            .map_err(WorkspaceRepositoryError::invalid_persisted_data)?;
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(self.id),
            project_id: ProjectId::from_uuid(self.project_id),
            phase_id: PhaseId::from_uuid(self.phase_id),
            title: self.title,
            description: self.description,
            status_column,
            priority,
            schedule: window_from_columns(self.start_at, self.end_at),
            column_order: rank_from_column(self.column_order)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }))
    }
}

impl DeliverableRow {
    /// Builds a row from a domain deliverable.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::Persistence`] when the resource
    /// links cannot be encoded.
    pub fn from_domain(deliverable: &Deliverable) -> WorkspaceRepositoryResult<Self> {
        let resource_links = serde_json::to_value(deliverable.resource_links())
            .map_err(WorkspaceRepositoryError::persistence)?;
        Ok(Self {
            id: deliverable.id().into_inner(),
            project_id: deliverable.project_id().into_inner(),
            phase_id: deliverable.phase_id().map(PhaseId::into_inner),
            title: deliverable.title().to_owned(),
            description: deliverable.description().map(str::to_owned),
            due_date: deliverable.due_date().map(IsoDate::as_naive),
            status: deliverable.status().as_str().to_owned(),
            resource_links,
            created_at: deliverable.created_at(),
        })
    }

    /// Reconstructs the domain deliverable.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::InvalidPersistedData`] for an
    /// unknown status or a links payload that is not an array of strings.
    pub fn into_domain(self) -> WorkspaceRepositoryResult<Deliverable> {
        let status = DeliverableStatus::try_from(self.status.as_str())
            .map_err(WorkspaceRepositoryError::invalid_persisted_data)?;
        let resource_links: Vec<String> = serde_json::from_value(self.resource_links)
            .map_err(WorkspaceRepositoryError::invalid_persisted_data)?;
        Ok(Deliverable::from_persisted(PersistedDeliverableData {
            id: DeliverableId::from_uuid(self.id),
            project_id: ProjectId::from_uuid(self.project_id),
            phase_id: self.phase_id.map(PhaseId::from_uuid),
            title: self.title,
            description: self.description,
            due_date: self.due_date.map(IsoDate::from_naive),
            status,
            resource_links,
            created_at: self.created_at,
        }))
    }
}

impl From<TaskLink> for TaskLinkRow {
    fn from(link: TaskLink) -> Self {
        Self {
            task_id: link.task_id.into_inner(),
            deliverable_id: link.deliverable_id.into_inner(),
        }
    }
}

impl From<TaskLinkRow> for TaskLink {
    fn from(row: TaskLinkRow) -> Self {
        Self::new(
            TaskId::from_uuid(row.task_id),
            DeliverableId::from_uuid(row.deliverable_id),
        )
    }
}
