//! Deliverable and task link operations on [`WorkspaceService`].

use super::{
    CreateDeliverableRequest, UpdateDeliverableRequest, WorkspaceService, WorkspaceServiceError,
    WorkspaceServiceResult, workspace::parse_date,
};
use crate::workspace::{
    domain::{
        Deliverable, DeliverableDraft, DeliverableId, OwnerId, ProjectId, TaskId, TaskLink,
        optional_text, required_text, validate_resource_links,
    },
    ports::WorkspaceRepository,
};
use mockable::Clock;

impl<R, C> WorkspaceService<R, C>
where
    R: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a deliverable.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::Domain`] for invalid text, dates, or
    /// resource links, or [`WorkspaceServiceError::PhaseNotFound`] when the
    /// phase belongs to another project.
    pub async fn create_deliverable(
        &self,
        owner_id: OwnerId,
        request: CreateDeliverableRequest,
    ) -> WorkspaceServiceResult<Deliverable> {
        let CreateDeliverableRequest {
            title: raw_title,
            phase_id,
            description: raw_description,
            due_date: raw_due_date,
            status,
            resource_links: raw_links,
        } = request;

        let project = self.require_project(owner_id).await?;
        let title = required_text(
            "deliverable title",
            &raw_title,
            self.config.max_deliverable_title_len,
        )?;
        let description = optional_text(
            "deliverable description",
            raw_description.as_deref(),
            self.config.max_description_len,
        )?;
        let due_date = raw_due_date.as_deref().map(parse_date).transpose()?;
        let resource_links = validate_resource_links(raw_links)?;
        if let Some(id) = phase_id {
            self.require_phase(project.id(), id).await?;
        }

        let deliverable = Deliverable::new(
            DeliverableDraft {
                project_id: project.id(),
                phase_id,
                title,
                description,
                due_date,
                status,
                resource_links,
            },
            &*self.clock,
        );
        self.repository.insert_deliverable(&deliverable).await?;
        tracing::info!(
            project_id = %project.id(),
            deliverable_id = %deliverable.id(),
            "deliverable created"
        );
        Ok(deliverable)
    }

    /// Applies a partial update to a deliverable.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::DeliverableNotFound`] when the
    /// deliverable is not in the owner's project, or the same validation
    /// errors as [`Self::create_deliverable`].
    pub async fn update_deliverable(
        &self,
        owner_id: OwnerId,
        deliverable_id: DeliverableId,
        request: UpdateDeliverableRequest,
    ) -> WorkspaceServiceResult<Deliverable> {
        let UpdateDeliverableRequest {
            title: new_title,
            phase_id: new_phase,
            description: new_description,
            due_date: new_due_date,
            status: new_status,
            resource_links: new_links,
        } = request;

        let project = self.require_project(owner_id).await?;
        let mut deliverable = self
            .require_deliverable(project.id(), deliverable_id)
            .await?;

        if let Some(title) = new_title {
            deliverable.rename(required_text(
                "deliverable title",
                &title,
                self.config.max_deliverable_title_len,
            )?);
        }
        if let Some(description) = new_description {
            deliverable.set_description(optional_text(
                "deliverable description",
                description.as_deref(),
                self.config.max_description_len,
            )?);
        }
        if let Some(due_date) = new_due_date {
            deliverable.set_due_date(due_date.as_deref().map(parse_date).transpose()?);
        }
        if let Some(status) = new_status {
            deliverable.set_status(status);
        }
        if let Some(links) = new_links {
            deliverable.set_resource_links(validate_resource_links(links)?);
        }
        if let Some(phase_id) = new_phase {
            if let Some(id) = phase_id {
                self.require_phase(project.id(), id).await?;
            }
            deliverable.assign_phase(phase_id);
        }

        self.repository.update_deliverable(&deliverable).await?;
        tracing::info!(
            project_id = %project.id(),
            deliverable_id = %deliverable_id,
            "deliverable updated"
        );
        Ok(deliverable)
    }

    /// Deletes a deliverable and its task links.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::DeliverableNotFound`] when the
    /// deliverable is not in the owner's project.
    pub async fn delete_deliverable(
        &self,
        owner_id: OwnerId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceServiceResult<()> {
        let project = self.require_project(owner_id).await?;
        self.require_deliverable(project.id(), deliverable_id)
            .await?;
        self.repository
            .delete_deliverable(project.id(), deliverable_id)
            .await?;
        tracing::info!(
            project_id = %project.id(),
            deliverable_id = %deliverable_id,
            "deliverable deleted"
        );
        Ok(())
    }

    /// Links a task to a deliverable. Linking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::TaskNotFound`] or
    /// [`WorkspaceServiceError::DeliverableNotFound`] when either end is not
    /// in the owner's project.
    pub async fn link_task_to_deliverable(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceServiceResult<()> {
        let link = self
            .require_link_ends(owner_id, task_id, deliverable_id)
            .await?;
        self.repository.link(link).await?;
        tracing::debug!(task_id = %task_id, deliverable_id = %deliverable_id, "task linked");
        Ok(())
    }

    /// Removes a task link. Removing a missing link is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::TaskNotFound`] or
    /// [`WorkspaceServiceError::DeliverableNotFound`] when either end is not
    /// in the owner's project.
    pub async fn unlink_task_from_deliverable(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceServiceResult<()> {
        let link = self
            .require_link_ends(owner_id, task_id, deliverable_id)
            .await?;
        self.repository.unlink(link).await?;
        tracing::debug!(task_id = %task_id, deliverable_id = %deliverable_id, "task unlinked");
        Ok(())
    }

    async fn require_deliverable(
        &self,
        project_id: ProjectId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceServiceResult<Deliverable> {
        self.repository
            .find_deliverable(project_id, deliverable_id)
            .await?
            .ok_or(WorkspaceServiceError::DeliverableNotFound(deliverable_id))
    }

    async fn require_link_ends(
        &self,
        owner_id: OwnerId,
        task_id: TaskId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceServiceResult<TaskLink> {
        let project = self.require_project(owner_id).await?;
        self.repository
            .find_task(project.id(), task_id)
            .await?
            .ok_or(WorkspaceServiceError::TaskNotFound(task_id))?;
        self.require_deliverable(project.id(), deliverable_id)
            .await?;
        Ok(TaskLink::new(task_id, deliverable_id))
    }
}
