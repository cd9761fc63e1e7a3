//! In-memory workspace repository for tests and embedding.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::planning::TaskUpdate;
use crate::workspace::{
    domain::{
        Deliverable, DeliverableId, OwnerId, Phase, Project, ProjectId, Task, TaskId, TaskLink,
        WorkspaceSeed,
    },
    ports::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult},
};

/// Thread-safe in-memory workspace repository.
///
/// A single lock guards all state, so each batch write is atomic with
/// respect to every reader.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspaceRepository {
    state: Arc<RwLock<InMemoryWorkspaceState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkspaceState {
    projects: HashMap<ProjectId, Project>,
    owner_index: HashMap<OwnerId, ProjectId>,
    phases: HashMap<ProjectId, Vec<Phase>>,
    tasks: HashMap<TaskId, Task>,
    deliverables: HashMap<DeliverableId, Deliverable>,
    links: BTreeSet<TaskLink>,
}

impl InMemoryWorkspaceState {
    fn task_in_project(&self, project_id: ProjectId, task_id: TaskId) -> Option<&Task> {
        self.tasks
            .get(&task_id)
            .filter(|task| task.project_id() == project_id)
    }

    fn check_placements(
        &self,
        project_id: ProjectId,
        updates: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()> {
        updates
            .iter()
            .find(|update| self.task_in_project(project_id, update.id).is_none())
            .map_or(Ok(()), |missing| {
                Err(WorkspaceRepositoryError::TaskNotFound(missing.id))
            })
    }

    fn apply_placements(&mut self, updates: &[TaskUpdate<TaskId>]) {
        for update in updates {
            if let Some(task) = self.tasks.get_mut(&update.id) {
                task.place(update.status_column, update.column_order);
            }
        }
    }
}

impl InMemoryWorkspaceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> WorkspaceRepositoryResult<RwLockReadGuard<'_, InMemoryWorkspaceState>> {
        self.state.read().map_err(|err| {
            WorkspaceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> WorkspaceRepositoryResult<RwLockWriteGuard<'_, InMemoryWorkspaceState>> {
        self.state.write().map_err(|err| {
            WorkspaceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn find_project_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> WorkspaceRepositoryResult<Option<Project>> {
        let state = self.read()?;
        let project = state
            .owner_index
            .get(&owner_id)
            .and_then(|id| state.projects.get(id))
            .cloned();
        Ok(project)
    }

    async fn insert_workspace(&self, seed: &WorkspaceSeed) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        let owner_id = seed.project.owner_id();
        if state.owner_index.contains_key(&owner_id) {
            return Err(WorkspaceRepositoryError::DuplicateOwner(owner_id));
        }

        let project_id = seed.project.id();
        state.owner_index.insert(owner_id, project_id);
        state.projects.insert(project_id, seed.project.clone());
        let mut phases = seed.phases.clone();
        phases.sort_by_key(Phase::order_index);
        state.phases.insert(project_id, phases);
        for deliverable in &seed.deliverables {
            state
                .deliverables
                .insert(deliverable.id(), deliverable.clone());
        }
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .projects
            .get_mut(&project.id())
            .ok_or(WorkspaceRepositoryError::ProjectNotFound(project.id()))?;
        *stored = project.clone();
        Ok(())
    }

    async fn list_phases(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<Phase>> {
        let state = self.read()?;
        Ok(state.phases.get(&project_id).cloned().unwrap_or_default())
    }

    async fn replace_phase_schedule(
        &self,
        project: &Project,
        phases: &[Phase],
    ) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&project.id()) {
            return Err(WorkspaceRepositoryError::ProjectNotFound(project.id()));
        }
        let mut ordered = phases.to_vec();
        ordered.sort_by_key(Phase::order_index);
        state.projects.insert(project.id(), project.clone());
        state.phases.insert(project.id(), ordered);
        Ok(())
    }

    async fn list_tasks(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn find_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> WorkspaceRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.task_in_project(project_id, task_id).cloned())
    }

    async fn insert_task(
        &self,
        task: &Task,
        deliverable_ids: &[DeliverableId],
    ) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&task.project_id()) {
            return Err(WorkspaceRepositoryError::ProjectNotFound(task.project_id()));
        }
        if let Some(missing) = deliverable_ids.iter().find(|id| {
            state
                .deliverables
                .get(id)
                .is_none_or(|deliverable| deliverable.project_id() != task.project_id())
        }) {
            return Err(WorkspaceRepositoryError::DeliverableNotFound(*missing));
        }

        state.tasks.insert(task.id(), task.clone());
        for deliverable_id in deliverable_ids {
            state.links.insert(TaskLink::new(task.id(), *deliverable_id));
        }
        Ok(())
    }

    async fn save_task(
        &self,
        task: &Task,
        placements: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        if state.task_in_project(task.project_id(), task.id()).is_none() {
            return Err(WorkspaceRepositoryError::TaskNotFound(task.id()));
        }
        state.check_placements(task.project_id(), placements)?;

        state.tasks.insert(task.id(), task.clone());
        state.apply_placements(placements);
        Ok(())
    }

    async fn apply_task_updates(
        &self,
        project_id: ProjectId,
        updates: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        state.check_placements(project_id, updates)?;
        state.apply_placements(updates);
        Ok(())
    }

    async fn delete_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        placements: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        if state.task_in_project(project_id, task_id).is_none() {
            return Err(WorkspaceRepositoryError::TaskNotFound(task_id));
        }
        let remaining: Vec<TaskUpdate<TaskId>> = placements
            .iter()
            .filter(|update| update.id != task_id)
            .cloned()
            .collect();
        state.check_placements(project_id, &remaining)?;

        state.tasks.remove(&task_id);
        state.links.retain(|link| link.task_id != task_id);
        state.apply_placements(&remaining);
        Ok(())
    }

    async fn list_deliverables(
        &self,
        project_id: ProjectId,
    ) -> WorkspaceRepositoryResult<Vec<Deliverable>> {
        let state = self.read()?;
        let deliverables = state
            .deliverables
            .values()
            .filter(|deliverable| deliverable.project_id() == project_id)
            .cloned()
            .collect();
        Ok(deliverables)
    }

    async fn find_deliverable(
        &self,
        project_id: ProjectId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceRepositoryResult<Option<Deliverable>> {
        let state = self.read()?;
        let deliverable = state
            .deliverables
            .get(&deliverable_id)
            .filter(|deliverable| deliverable.project_id() == project_id)
            .cloned();
        Ok(deliverable)
    }

    async fn insert_deliverable(&self, deliverable: &Deliverable) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&deliverable.project_id()) {
            return Err(WorkspaceRepositoryError::ProjectNotFound(
                deliverable.project_id(),
            ));
        }
        state
            .deliverables
            .insert(deliverable.id(), deliverable.clone());
        Ok(())
    }

    async fn update_deliverable(&self, deliverable: &Deliverable) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .deliverables
            .get_mut(&deliverable.id())
            .filter(|stored| stored.project_id() == deliverable.project_id())
            .ok_or(WorkspaceRepositoryError::DeliverableNotFound(
                deliverable.id(),
            ))?;
        *stored = deliverable.clone();
        Ok(())
    }

    async fn delete_deliverable(
        &self,
        project_id: ProjectId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        let belongs = state
            .deliverables
            .get(&deliverable_id)
            .is_some_and(|deliverable| deliverable.project_id() == project_id);
        if !belongs {
            return Err(WorkspaceRepositoryError::DeliverableNotFound(
                deliverable_id,
            ));
        }
        state.deliverables.remove(&deliverable_id);
        state
            .links
            .retain(|link| link.deliverable_id != deliverable_id);
        Ok(())
    }

    async fn list_links(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<TaskLink>> {
        let state = self.read()?;
        let links = state
            .links
            .iter()
            .filter(|link| state.task_in_project(project_id, link.task_id).is_some())
            .copied()
            .collect();
        Ok(links)
    }

    async fn link(&self, link: TaskLink) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&link.task_id) {
            return Err(WorkspaceRepositoryError::TaskNotFound(link.task_id));
        }
        if !state.deliverables.contains_key(&link.deliverable_id) {
            return Err(WorkspaceRepositoryError::DeliverableNotFound(
                link.deliverable_id,
            ));
        }
        state.links.insert(link);
        Ok(())
    }

    async fn unlink(&self, link: TaskLink) -> WorkspaceRepositoryResult<()> {
        let mut state = self.write()?;
        state.links.remove(&link);
        Ok(())
    }
}
