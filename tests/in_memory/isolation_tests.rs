//! Owners only ever see their own workspace.

use crate::in_memory::helpers::{TestService, bootstrap, column_titles, service, task_in};
use phaseboard::{
    planning::StatusColumn,
    workspace::services::{ReorderTaskRequest, UpdateTaskRequest, WorkspaceServiceError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_owner_gets_a_separate_workspace(service: TestService) {
    let (alice, alice_phases) = bootstrap(&service).await;
    let (bob, _) = bootstrap(&service).await;
    task_in(&service, alice, &alice_phases, "Alice's task", StatusColumn::Todo).await;

    let alice_project = service.project(alice).await.expect("project should load");
    let bob_project = service.project(bob).await.expect("project should load");

    assert_ne!(alice_project.id(), bob_project.id());
    assert!(
        column_titles(&service, bob, StatusColumn::Todo)
            .await
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_tasks_cannot_be_moved_or_edited(service: TestService) {
    let (alice, alice_phases) = bootstrap(&service).await;
    let (bob, _) = bootstrap(&service).await;
    let task = task_in(&service, alice, &alice_phases, "Alice's task", StatusColumn::Todo).await;

    let moved = service
        .reorder_task(bob, ReorderTaskRequest::new(task.id(), StatusColumn::Done, 0))
        .await
        .expect_err("foreign task should not move");
    assert!(matches!(moved, WorkspaceServiceError::Reorder(_)));

    let edited = service
        .update_task(bob, task.id(), UpdateTaskRequest::new().with_title("Hijacked"))
        .await
        .expect_err("foreign task should not change");
    assert!(matches!(edited, WorkspaceServiceError::TaskNotFound(_)));

    assert_eq!(
        column_titles(&service, alice, StatusColumn::Todo).await,
        vec!["Alice's task"]
    );
}
