//! Shared fixtures for in-memory workspace flow tests.

use std::sync::Arc;

use mockable::DefaultClock;
use phaseboard::{
    planning::StatusColumn,
    workspace::{
        adapters::memory::InMemoryWorkspaceRepository,
        domain::{OwnerId, Phase, Task},
        services::{CreateTaskRequest, WorkspaceService},
    },
};
use rstest::fixture;

/// Service type used by the flow tests.
pub type TestService = WorkspaceService<InMemoryWorkspaceRepository, DefaultClock>;

#[fixture]
pub fn service() -> TestService {
    WorkspaceService::new(
        Arc::new(InMemoryWorkspaceRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Bootstraps a fresh owner and returns it with the seeded phases.
pub async fn bootstrap(service: &TestService) -> (OwnerId, Vec<Phase>) {
    let owner = OwnerId::new();
    service
        .bootstrap(owner)
        .await
        .expect("bootstrap should succeed");
    let phases = service
        .timeline(owner)
        .await
        .expect("timeline should load")
        .phases;
    (owner, phases)
}

/// Creates a task in `column` within the implementation phase.
pub async fn task_in(
    service: &TestService,
    owner: OwnerId,
    phases: &[Phase],
    title: &str,
    column: StatusColumn,
) -> Task {
    let phase = phases.get(1).expect("implementation phase exists");
    service
        .create_task(
            owner,
            CreateTaskRequest::new(phase.id(), title, "2026-03-02", "2026-03-13")
                .with_status_column(column),
        )
        .await
        .expect("task creation should succeed")
}

/// Titles of one board column in rank order.
pub async fn column_titles(
    service: &TestService,
    owner: OwnerId,
    column: StatusColumn,
) -> Vec<String> {
    service
        .board(owner)
        .await
        .expect("board should load")
        .column(column)
        .map(|entry| entry.task.title().to_owned())
        .collect()
}
