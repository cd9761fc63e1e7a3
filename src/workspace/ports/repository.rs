//! Repository port for workspace persistence.

use crate::planning::TaskUpdate;
use crate::workspace::domain::{
    Deliverable, DeliverableId, OwnerId, Phase, Project, ProjectId, Task, TaskId, TaskLink,
    WorkspaceSeed,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace repository operations.
pub type WorkspaceRepositoryResult<T> = Result<T, WorkspaceRepositoryError>;

/// Workspace persistence contract.
///
/// Every method that takes more than one record applies them atomically:
/// either all of the writes become visible or none do.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Finds the project owned by `owner_id`.
    async fn find_project_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> WorkspaceRepositoryResult<Option<Project>>;

    /// Stores a freshly seeded project with its phases and deliverables.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::DuplicateOwner`] when the owner
    /// already has a project.
    async fn insert_workspace(&self, seed: &WorkspaceSeed) -> WorkspaceRepositoryResult<()>;

    /// Persists title and description changes to a project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn update_project(&self, project: &Project) -> WorkspaceRepositoryResult<()>;

    /// Returns the project's phases ordered by `order_index`.
    async fn list_phases(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<Phase>>;

    /// Rewrites the project window and every phase in one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn replace_phase_schedule(
        &self,
        project: &Project,
        phases: &[Phase],
    ) -> WorkspaceRepositoryResult<()>;

    /// Returns every task of the project in no particular order.
    async fn list_tasks(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<Task>>;

    /// Finds a task scoped to `project_id`.
    async fn find_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> WorkspaceRepositoryResult<Option<Task>>;

    /// Stores a new task together with its deliverable links.
    async fn insert_task(
        &self,
        task: &Task,
        deliverable_ids: &[DeliverableId],
    ) -> WorkspaceRepositoryResult<()>;

    /// Persists field changes to a task and applies column placements in the
    /// same atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::TaskNotFound`] when the task or
    /// any placement target does not exist.
    async fn save_task(
        &self,
        task: &Task,
        placements: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()>;

    /// Applies computed column placements atomically.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::TaskNotFound`] when a placement
    /// names a task outside the project; nothing is written in that case.
    async fn apply_task_updates(
        &self,
        project_id: ProjectId,
        updates: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()>;

    /// Deletes a task, its links, and applies the renumbering of the column
    /// it left.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::TaskNotFound`] when the task does
    /// not exist in the project.
    async fn delete_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        placements: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()>;

    /// Returns every deliverable of the project in no particular order.
    async fn list_deliverables(
        &self,
        project_id: ProjectId,
    ) -> WorkspaceRepositoryResult<Vec<Deliverable>>;

    /// Finds a deliverable scoped to `project_id`.
    async fn find_deliverable(
        &self,
        project_id: ProjectId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceRepositoryResult<Option<Deliverable>>;

    /// Stores a new deliverable.
    async fn insert_deliverable(&self, deliverable: &Deliverable) -> WorkspaceRepositoryResult<()>;

    /// Persists changes to an existing deliverable.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::DeliverableNotFound`] when the
    /// deliverable does not exist.
    async fn update_deliverable(&self, deliverable: &Deliverable) -> WorkspaceRepositoryResult<()>;

    /// Deletes a deliverable and every link pointing at it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::DeliverableNotFound`] when the
    /// deliverable does not exist in the project.
    async fn delete_deliverable(
        &self,
        project_id: ProjectId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceRepositoryResult<()>;

    /// Returns every task link within the project.
    async fn list_links(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<TaskLink>>;

    /// Links a task to a deliverable. Linking twice is a no-op.
    async fn link(&self, link: TaskLink) -> WorkspaceRepositoryResult<()>;

    /// Removes a link. Removing a missing link is a no-op.
    async fn unlink(&self, link: TaskLink) -> WorkspaceRepositoryResult<()>;
}

/// Errors returned by workspace repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceRepositoryError {
    /// The owner already has a project.
    #[error("owner already has a project: {0}")]
    DuplicateOwner(OwnerId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The deliverable was not found.
    #[error("deliverable not found: {0}")]
    DeliverableNotFound(DeliverableId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkspaceRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
