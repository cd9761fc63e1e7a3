//! Board task operations on [`WorkspaceService`].

use super::{
    CreateTaskRequest, ReorderTaskRequest, UpdateTaskRequest, WorkspaceService,
    WorkspaceServiceError, WorkspaceServiceResult, workspace::parse_date,
};
use crate::planning::{
    DateWindow, StatusColumn, TaskPlacement, TaskUpdate, compute_reorder, renumber_column,
};
use crate::workspace::{
    domain::{DeliverableId, OwnerId, Task, TaskDraft, TaskId, optional_text, required_text},
    ports::WorkspaceRepository,
};
use mockable::Clock;
use std::collections::HashSet;

impl<R, C> WorkspaceService<R, C>
where
    R: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a task at the bottom of its column.
    ///
    /// Requested deliverables that do not belong to the project are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::Domain`] for invalid text or dates,
    /// [`WorkspaceServiceError::Window`] when the dates fall outside the
    /// project window, or [`WorkspaceServiceError::PhaseNotFound`] when the
    /// phase belongs to another project.
    pub async fn create_task(
        &self,
        owner_id: OwnerId,
        request: CreateTaskRequest,
    ) -> WorkspaceServiceResult<Task> {
        let CreateTaskRequest {
            phase_id,
            title: raw_title,
            description: raw_description,
            status_column,
            priority,
            start_at,
            end_at,
            deliverable_ids,
        } = request;

        let _guard = self.write_lock.lock().await;
        let project = self.require_project(owner_id).await?;
        let title = required_text("task title", &raw_title, self.config.max_task_title_len)?;
        let description = optional_text(
            "task description",
            raw_description.as_deref(),
            self.config.max_description_len,
        )?;
        let schedule =
            Self::task_schedule(&project, parse_date(&start_at)?, parse_date(&end_at)?)?;
        self.require_phase(project.id(), phase_id).await?;

        let existing = self.repository.list_tasks(project.id()).await?;
        let column_order = next_rank(&existing, status_column);
        let known: HashSet<DeliverableId> = self
            .repository
            .list_deliverables(project.id())
            .await?
            .iter()
            .map(|deliverable| deliverable.id())
            .collect();
        let mut seen = HashSet::new();
        let links: Vec<DeliverableId> = deliverable_ids
            .into_iter()
            .filter(|id| known.contains(id) && seen.insert(*id))
            .collect();

        let task = Task::new(
            TaskDraft {
                project_id: project.id(),
                phase_id,
                title,
                description,
                status_column,
                priority,
                schedule,
                column_order,
            },
            &*self.clock,
        );
        self.repository.insert_task(&task, &links).await?;
        tracing::info!(
            project_id = %project.id(),
            task_id = %task.id(),
            column = %status_column,
            column_order,
            links = links.len(),
            "task created"
        );
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// Changing the column appends the task to the bottom of the new column
    /// and closes the gap it leaves behind.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::TaskNotFound`] when the task is not in
    /// the owner's project, or the same validation errors as
    /// [`Self::create_task`].
    pub async fn update_task(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> WorkspaceServiceResult<Task> {
        let UpdateTaskRequest {
            phase_id: new_phase,
            title: new_title,
            description: new_description,
            status_column: new_column,
            priority: new_priority,
            start_at,
            end_at,
        } = request;

        let _guard = self.write_lock.lock().await;
        let project = self.require_project(owner_id).await?;
        let tasks = self.repository.list_tasks(project.id()).await?;
        let mut task = tasks
            .iter()
            .find(|task| task.id() == task_id)
            .cloned()
            .ok_or(WorkspaceServiceError::TaskNotFound(task_id))?;

        if let Some(title) = new_title {
            task.rename(required_text(
                "task title",
                &title,
                self.config.max_task_title_len,
            )?);
        }
        if let Some(description) = new_description {
            task.set_description(optional_text(
                "task description",
                description.as_deref(),
                self.config.max_description_len,
            )?);
        }
        if let Some(phase_id) = new_phase {
            self.require_phase(project.id(), phase_id).await?;
            task.assign_phase(phase_id);
        }
        if let Some(priority) = new_priority {
            task.set_priority(priority);
        }
        if start_at.is_some() || end_at.is_some() {
            let current = task.schedule();
            let start = start_at
                .as_deref()
                .map(parse_date)
                .transpose()?
                .unwrap_or(current.start_date());
            let end = end_at
                .as_deref()
                .map(parse_date)
                .transpose()?
                .unwrap_or(current.end_date());
            let schedule: DateWindow = Self::task_schedule(&project, start, end)?;
            task.reschedule(schedule);
        }

        let placements = match new_column.filter(|column| *column != task.status_column()) {
            Some(target) => {
                let snapshot: Vec<TaskPlacement<TaskId>> =
                    tasks.iter().map(Task::placement).collect();
                let updates = compute_reorder(&snapshot, &task_id, target, i64::MAX)?;
                if let Some(own) = updates.iter().find(|update| update.id == task_id) {
                    task.place(own.status_column, own.column_order);
                }
                updates
            }
            None => Vec::new(),
        };

        task.touch(&*self.clock);
        self.repository.save_task(&task, &placements).await?;
        tracing::debug!(task_id = %task_id, updates = placements.len(), "task placements");
        tracing::info!(project_id = %project.id(), task_id = %task_id, "task updated");
        Ok(task)
    }

    /// Deletes a task and closes the gap in its column.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::TaskNotFound`] when the task is not in
    /// the owner's project.
    pub async fn delete_task(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
    ) -> WorkspaceServiceResult<()> {
        let _guard = self.write_lock.lock().await;
        let project = self.require_project(owner_id).await?;
        let tasks = self.repository.list_tasks(project.id()).await?;
        let vacated = tasks
            .iter()
            .find(|task| task.id() == task_id)
            .map(Task::status_column)
            .ok_or(WorkspaceServiceError::TaskNotFound(task_id))?;

        let remaining: Vec<TaskPlacement<TaskId>> = tasks
            .iter()
            .filter(|task| task.id() != task_id)
            .map(Task::placement)
            .collect();
        let placements = renumber_column(&remaining, vacated);
        self.repository
            .delete_task(project.id(), task_id, &placements)
            .await?;
        tracing::info!(
            project_id = %project.id(),
            task_id = %task_id,
            column = %vacated,
            "task deleted"
        );
        Ok(())
    }

    /// Moves a task to `target_index` within `target_column` and writes the
    /// renumbered columns atomically.
    ///
    /// Returns the placements that were written.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::Reorder`] when the task is not in the
    /// owner's project; nothing is written in that case.
    pub async fn reorder_task(
        &self,
        owner_id: OwnerId,
        request: ReorderTaskRequest,
    ) -> WorkspaceServiceResult<Vec<TaskUpdate<TaskId>>> {
        let ReorderTaskRequest {
            task_id,
            target_column,
            target_index,
        } = request;

        let _guard = self.write_lock.lock().await;
        let project = self.require_project(owner_id).await?;
        let snapshot: Vec<TaskPlacement<TaskId>> = self
            .repository
            .list_tasks(project.id())
            .await?
            .iter()
            .map(Task::placement)
            .collect();
        let updates = compute_reorder(&snapshot, &task_id, target_column, target_index)
            .inspect_err(|err| {
                tracing::warn!(project_id = %project.id(), error = %err, "reorder rejected");
            })?;
        tracing::debug!(task_id = %task_id, updates = updates.len(), "reorder computed");

        self.repository
            .apply_task_updates(project.id(), &updates)
            .await?;
        tracing::info!(
            project_id = %project.id(),
            task_id = %task_id,
            column = %target_column,
            target_index,
            "task moved"
        );
        Ok(updates)
    }
}

/// Rank one past the current bottom of `column`, or zero when it is empty.
fn next_rank(tasks: &[Task], column: StatusColumn) -> u32 {
    tasks
        .iter()
        .filter(|task| task.status_column() == column)
        .map(Task::column_order)
        .max()
        .map_or(0, |bottom| bottom.saturating_add(1))
}
