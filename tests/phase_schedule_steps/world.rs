//! Shared world state for phase schedule BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use phaseboard::workspace::{
    adapters::memory::InMemoryWorkspaceRepository,
    domain::{OwnerId, Phase},
    services::{WorkspaceService, WorkspaceServiceResult},
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestWorkspaceService = WorkspaceService<InMemoryWorkspaceRepository, DefaultClock>;

/// Scenario world for phase schedule behaviour tests.
pub struct ScheduleWorld {
    pub service: TestWorkspaceService,
    pub owner: OwnerId,
    pub phases: Vec<Phase>,
    pub schedule_result: Option<WorkspaceServiceResult<Vec<Phase>>>,
    pub task_error: Option<String>,
}

impl ScheduleWorld {
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
            schedule_result: None,
            task_error: None,
        }
    }

    /// Returns the seeded phase at `index`.
    pub fn phase(&self, index: usize) -> Result<&Phase, eyre::Report> {
        self.phases
            .get(index)
            .ok_or_else(|| eyre::eyre!("missing phase {index} in scenario world"))
    }
}

impl Default for ScheduleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ScheduleWorld {
    ScheduleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
