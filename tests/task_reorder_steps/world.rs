//! Shared world state for kanban reordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use phaseboard::{
    planning::StatusColumn,
    workspace::{
        adapters::memory::InMemoryWorkspaceRepository,
        domain::{OwnerId, Phase, TaskId},
        services::{WorkspaceService, WorkspaceServiceError},
    },
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestWorkspaceService = WorkspaceService<InMemoryWorkspaceRepository, DefaultClock>;

/// Scenario world for reordering behaviour tests.
pub struct ReorderWorld {
    pub service: TestWorkspaceService,
    pub owner: OwnerId,
    pub phases: Vec<Phase>,
    pub tasks: HashMap<String, TaskId>,
    pub last_error: Option<WorkspaceServiceError>,
}

impl ReorderWorld {
    /// Creates a world for a fresh owner without a workspace.
    #[must_use]
    pub fn new() -> Self {
        let service = WorkspaceService::new(
            Arc::new(InMemoryWorkspaceRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            owner: OwnerId::new(),
            phases: Vec::new(),
            tasks: HashMap::new(),
            last_error: None,
        }
    }

    /// Looks up a task created earlier in the scenario.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task named '{title}' in scenario world"))
    }
}

impl Default for ReorderWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReorderWorld {
    ReorderWorld::default()
}

/// Parses a column name used in feature files.
pub fn column(name: &str) -> Result<StatusColumn, eyre::Report> {
    StatusColumn::try_from(name).map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
