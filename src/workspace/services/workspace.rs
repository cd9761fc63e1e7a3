//! Workspace service: project, phase schedule, and read models.
//!
//! Task and deliverable operations live in sibling modules as further
//! `impl` blocks on [`WorkspaceService`].

use super::{
    BoardTask, BoardView, DeliverableSummary, TimelineView, UpdatePhasesRequest,
    UpdateProjectRequest, WorkspaceServiceError, WorkspaceServiceResult,
};
use crate::planning::{
    DateWindow, IsoDate, StatusColumn, relative_day_label, sequence_span, validate_sequence,
    validate_task_window,
};
use crate::workspace::{
    WorkspaceConfig,
    domain::{
        DeliverableId, OwnerId, Phase, PhaseId, Project, ProjectId, TaskId, WorkspaceDomainError,
        WorkspaceSeed, optional_text, required_text,
    },
    ports::{WorkspaceRepository, WorkspaceRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Orchestrates every workspace operation for a single owner at a time.
///
/// Read-compute-write sections (reorders, schedule changes, and task
/// create, update, or delete) hold an internal lock, so two concurrent moves
/// never compute from the same stale snapshot. Clones share the lock.
#[derive(Clone)]
pub struct WorkspaceService<R, C>
where
    R: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    pub(super) repository: Arc<R>,
    pub(super) clock: Arc<C>,
    pub(super) config: WorkspaceConfig,
    pub(super) write_lock: Arc<Mutex<()>>,
}

impl<R, C> WorkspaceService<R, C>
where
    R: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            config: WorkspaceConfig::default(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: WorkspaceConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Returns the owner's project, creating the default thesis workspace on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::Sequence`] if the default phases do
    /// not form a valid sequence, or [`WorkspaceServiceError::Repository`]
    /// when persistence fails.
    pub async fn bootstrap(&self, owner_id: OwnerId) -> WorkspaceServiceResult<Project> {
        let _guard = self.write_lock.lock().await;
        if let Some(existing) = self.repository.find_project_by_owner(owner_id).await? {
            return Ok(existing);
        }

        let seed = WorkspaceSeed::thesis_template(owner_id, &*self.clock)?;
        let windows: Vec<DateWindow> = seed.phases.iter().map(Phase::window).collect();
        validate_sequence(&windows)?;

        match self.repository.insert_workspace(&seed).await {
            Ok(()) => {}
            Err(WorkspaceRepositoryError::DuplicateOwner(_)) => {
                return self.require_project(owner_id).await;
            }
            Err(err) => return Err(err.into()),
        }
        tracing::info!(
            owner_id = %owner_id,
            project_id = %seed.project.id(),
            phases = seed.phases.len(),
            deliverables = seed.deliverables.len(),
            "workspace bootstrapped"
        );
        Ok(seed.project)
    }

    /// Returns the owner's project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::ProjectNotFound`] when the owner has
    /// not bootstrapped a workspace.
    pub async fn project(&self, owner_id: OwnerId) -> WorkspaceServiceResult<Project> {
        self.require_project(owner_id).await
    }

    /// Patches the project title and description.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::Domain`] when the text is empty or too
    /// long.
    pub async fn update_project(
        &self,
        owner_id: OwnerId,
        request: UpdateProjectRequest,
    ) -> WorkspaceServiceResult<Project> {
        let UpdateProjectRequest {
            title: new_title,
            description: new_description,
        } = request;
        let mut project = self.require_project(owner_id).await?;
        if let Some(title) = new_title {
            project.rename(required_text(
                "project title",
                &title,
                self.config.max_project_title_len,
            )?);
        }
        if let Some(description) = new_description {
            project.set_description(optional_text(
                "project description",
                description.as_deref(),
                self.config.max_description_len,
            )?);
        }
        self.repository.update_project(&project).await?;
        tracing::info!(project_id = %project.id(), "project updated");
        Ok(project)
    }

    /// Replaces the name and dates of every phase.
    ///
    /// The request must name each existing phase exactly once. The phases
    /// keep their sequence positions, must form a valid sequence, and the
    /// project window is moved to span them. Every existing task must still
    /// fit inside the new window.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::PhaseMismatch`],
    /// [`WorkspaceServiceError::Sequence`], or
    /// [`WorkspaceServiceError::TaskOutsideSchedule`] when the schedule is
    /// rejected; nothing is written in that case.
    pub async fn update_phases(
        &self,
        owner_id: OwnerId,
        request: UpdatePhasesRequest,
    ) -> WorkspaceServiceResult<Vec<Phase>> {
        let _guard = self.write_lock.lock().await;
        let mut project = self.require_project(owner_id).await?;
        let mut phases = self.repository.list_phases(project.id()).await?;
        if phases.is_empty() {
            return Err(WorkspaceServiceError::NoPhases);
        }

        let supplied = request.phases.len();
        let mut entries: HashMap<_, _> = request
            .phases
            .into_iter()
            .map(|entry| (entry.id, entry))
            .collect();
        if supplied != phases.len() || entries.len() != supplied {
            return Err(WorkspaceServiceError::PhaseMismatch);
        }
        for phase in &mut phases {
            let entry = entries
                .remove(&phase.id())
                .ok_or(WorkspaceServiceError::PhaseMismatch)?;
            let name = required_text("phase name", &entry.name, self.config.max_phase_name_len)?;
            let window = DateWindow::parse(&entry.start_date, &entry.end_date)
                .map_err(WorkspaceDomainError::from)?;
            phase.revise(name, window);
        }

        let windows: Vec<DateWindow> = phases.iter().map(Phase::window).collect();
        validate_sequence(&windows).inspect_err(|violation| {
            tracing::warn!(project_id = %project.id(), %violation, "phase schedule rejected");
        })?;
        let span = sequence_span(&windows).ok_or(WorkspaceServiceError::NoPhases)?;

        let mut tasks = self.repository.list_tasks(project.id()).await?;
        tasks.sort_by_key(|task| (task.schedule().start_date(), task.created_at()));
        if let Some(outside) = tasks.iter().find(|task| {
            let schedule = task.schedule();
            validate_task_window(&span, schedule.start_date(), schedule.end_date()).is_err()
        }) {
            tracing::warn!(
                project_id = %project.id(),
                task_id = %outside.id(),
                "phase schedule would strand an existing task"
            );
            return Err(WorkspaceServiceError::TaskOutsideSchedule {
                title: outside.title().to_owned(),
            });
        }

        project.reschedule(span);
        self.repository
            .replace_phase_schedule(&project, &phases)
            .await?;
        tracing::info!(
            project_id = %project.id(),
            start_date = %span.start_date(),
            end_date = %span.end_date(),
            "phase schedule replaced"
        );
        Ok(phases)
    }

    /// Returns the kanban board.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::ProjectNotFound`] when the owner has
    /// no project, or [`WorkspaceServiceError::Repository`] when a read fails.
    pub async fn board(&self, owner_id: OwnerId) -> WorkspaceServiceResult<BoardView> {
        let project = self.require_project(owner_id).await?;
        let phases = self.repository.list_phases(project.id()).await?;
        let mut tasks = self.repository.list_tasks(project.id()).await?;
        tasks.sort_by_key(|task| (task.status_column(), task.column_order(), task.created_at()));
        let mut deliverables = self.repository.list_deliverables(project.id()).await?;
        deliverables.sort_by_key(|deliverable| deliverable.created_at());

        let mut linked: HashMap<TaskId, Vec<DeliverableId>> = HashMap::new();
        for link in self.repository.list_links(project.id()).await? {
            linked
                .entry(link.task_id)
                .or_default()
                .push(link.deliverable_id);
        }

        let board_tasks = tasks
            .into_iter()
            .map(|task| BoardTask {
                deliverable_ids: linked.remove(&task.id()).unwrap_or_default(),
                task,
            })
            .collect();
        Ok(BoardView {
            project,
            phases,
            tasks: board_tasks,
            deliverables,
        })
    }

    /// Returns the timeline with the phase that contains today.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::ProjectNotFound`] when the owner has
    /// no project, or [`WorkspaceServiceError::Repository`] when a read fails.
    pub async fn timeline(&self, owner_id: OwnerId) -> WorkspaceServiceResult<TimelineView> {
        let project = self.require_project(owner_id).await?;
        let phases = self.repository.list_phases(project.id()).await?;
        let mut tasks = self.repository.list_tasks(project.id()).await?;
        tasks.sort_by_key(|task| (task.schedule().start_date(), task.created_at()));

        let today = self.today();
        let current_phase = phases
            .iter()
            .find(|phase| phase.window().contains(today))
            .map(Phase::id);
        Ok(TimelineView {
            project,
            phases,
            tasks,
            current_phase,
            today,
        })
    }

    /// Returns every deliverable with its progress figures, soonest due
    /// first and undated deliverables last.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::ProjectNotFound`] when the owner has
    /// no project, or [`WorkspaceServiceError::Repository`] when a read fails.
    pub async fn deliverable_summaries(
        &self,
        owner_id: OwnerId,
    ) -> WorkspaceServiceResult<Vec<DeliverableSummary>> {
        let project = self.require_project(owner_id).await?;
        let columns: HashMap<TaskId, StatusColumn> = self
            .repository
            .list_tasks(project.id())
            .await?
            .iter()
            .map(|task| (task.id(), task.status_column()))
            .collect();
        let links = self.repository.list_links(project.id()).await?;
        let mut deliverables = self.repository.list_deliverables(project.id()).await?;
        deliverables.sort_by_key(|deliverable| {
            let due = deliverable.due_date();
            (due.is_none(), due, deliverable.created_at())
        });

        let today = self.today();
        let summaries = deliverables
            .into_iter()
            .map(|deliverable| {
                let linked: Vec<TaskId> = links
                    .iter()
                    .filter(|link| link.deliverable_id == deliverable.id())
                    .map(|link| link.task_id)
                    .collect();
                let completed_tasks = linked
                    .iter()
                    .filter(|id| columns.get(*id) == Some(&StatusColumn::Done))
                    .count();
                let days_until_due = deliverable.due_date().map(|due| due.days_until(today));
                DeliverableSummary {
                    linked_tasks: linked.len(),
                    completed_tasks,
                    days_until_due,
                    due_label: days_until_due.map(relative_day_label),
                    deliverable,
                }
            })
            .collect();
        Ok(summaries)
    }

    pub(super) fn today(&self) -> IsoDate {
        IsoDate::from_naive(
            self.clock
                .utc()
                .with_timezone(&self.config.time_zone)
                .date_naive(),
        )
    }

    pub(super) async fn require_project(
        &self,
        owner_id: OwnerId,
    ) -> WorkspaceServiceResult<Project> {
        self.repository
            .find_project_by_owner(owner_id)
            .await?
            .ok_or(WorkspaceServiceError::ProjectNotFound(owner_id))
    }

    pub(super) async fn require_phase(
        &self,
        project_id: ProjectId,
        phase_id: PhaseId,
    ) -> WorkspaceServiceResult<Phase> {
        self.repository
            .list_phases(project_id)
            .await?
            .into_iter()
            .find(|phase| phase.id() == phase_id)
            .ok_or(WorkspaceServiceError::PhaseNotFound(phase_id))
    }

    /// Checks task dates against the project window.
    pub(super) fn task_schedule(
        project: &Project,
        start_at: IsoDate,
        end_at: IsoDate,
    ) -> WorkspaceServiceResult<DateWindow> {
        validate_task_window(&project.window(), start_at, end_at).inspect_err(|violation| {
            tracing::warn!(project_id = %project.id(), %violation, "task dates rejected");
        })?;
        Ok(DateWindow::new(start_at, end_at))
    }
}

pub(super) fn parse_date(value: &str) -> Result<IsoDate, WorkspaceDomainError> {
    IsoDate::parse(value).map_err(WorkspaceDomainError::from)
}
