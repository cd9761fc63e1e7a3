//! Schedule flows: phases move while tasks stay inside the project window.

use crate::in_memory::helpers::{TestService, bootstrap, service, task_in};
use phaseboard::{
    planning::StatusColumn,
    workspace::services::{PhaseScheduleEntry, UpdatePhasesRequest, WorkspaceServiceError},
};
use rstest::rstest;

const EXTENDED: [(&str, &str); 5] = [
    ("2026-02-01", "2026-02-28"),
    ("2026-03-01", "2026-04-10"),
    ("2026-04-11", "2026-04-25"),
    ("2026-04-26", "2026-05-20"),
    ("2026-05-21", "2026-06-12"),
];

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn extending_the_schedule_keeps_tasks(service: TestService) {
    let (owner, phases) = bootstrap(&service).await;
    task_in(&service, owner, &phases, "Parser", StatusColumn::Todo).await;
    let request = UpdatePhasesRequest::new(phases.iter().zip(EXTENDED).map(
        |(phase, (start, end))| PhaseScheduleEntry::new(phase.id(), phase.name(), start, end),
    ));

    let updated = service
        .update_phases(owner, request)
        .await
        .expect("extended schedule should be accepted");

    assert_eq!(updated.len(), 5);
    let project = service.project(owner).await.expect("project should load");
    assert_eq!(project.window().end_date().to_string(), "2026-06-12");

    let timeline = service.timeline(owner).await.expect("timeline should load");
    assert_eq!(timeline.tasks.len(), 1);
    let names: Vec<&str> = timeline.phases.iter().map(|phase| phase.name()).collect();
    assert_eq!(names.first().copied(), Some("Pre-study"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renaming_phases_through_the_schedule(service: TestService) {
    let (owner, phases) = bootstrap(&service).await;
    let request = UpdatePhasesRequest::new(phases.iter().map(|phase| {
        let window = phase.window();
        PhaseScheduleEntry::new(
            phase.id(),
            format!("{} (revised)", phase.name()),
            window.start_date().to_string(),
            window.end_date().to_string(),
        )
    }));

    let updated = service
        .update_phases(owner, request)
        .await
        .expect("renamed schedule should be accepted");

    assert!(updated.iter().all(|phase| phase.name().ends_with("(revised)")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_phase_name_is_rejected(service: TestService) {
    let (owner, phases) = bootstrap(&service).await;
    let request = UpdatePhasesRequest::new(phases.iter().map(|phase| {
        let window = phase.window();
        PhaseScheduleEntry::new(
            phase.id(),
            "  ",
            window.start_date().to_string(),
            window.end_date().to_string(),
        )
    }));

    let err = service
        .update_phases(owner, request)
        .await
        .expect_err("blank names should be rejected");

    assert!(matches!(err, WorkspaceServiceError::Domain(_)));
}
