//! Task writes and their transactional rollback.

use crate::postgres::helpers::{
    CleanupGuard, board, database_name, ensure_template, seeded, setup_repository, task,
    test_runtime,
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use phaseboard::{
    planning::{StatusColumn, TaskUpdate},
    workspace::{
        domain::TaskId,
        ports::{WorkspaceRepository, WorkspaceRepositoryError},
    },
};
use rstest::rstest;

#[rstest]
fn inserted_task_reads_back_with_links(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("task_round_trip");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repository = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();
    let workspace = seeded(&rt, &repository);
    let draft = task(&workspace, "Survey", StatusColumn::InProgress, 0);
    let linked: Vec<_> = workspace
        .deliverables
        .iter()
        .take(2)
        .map(|deliverable| deliverable.id())
        .collect();

    rt.block_on(repository.insert_task(&draft, &linked))
        .expect("task insert");

    let stored = rt
        .block_on(repository.find_task(workspace.project.id(), draft.id()))
        .expect("lookup succeeds")
        .expect("task exists");
    assert_eq!(stored.title(), "Survey");
    assert_eq!(stored.description(), Some("Survey notes"));
    assert_eq!(stored.status_column(), StatusColumn::InProgress);
    assert_eq!(stored.priority(), draft.priority());
    assert_eq!(stored.schedule(), draft.schedule());
    assert_eq!(stored.phase_id(), draft.phase_id());

    let mut link_targets: Vec<_> = rt
        .block_on(repository.list_links(workspace.project.id()))
        .expect("links load")
        .into_iter()
        .map(|link| link.deliverable_id)
        .collect();
    link_targets.sort();
    let mut expected = linked;
    expected.sort();
    assert_eq!(link_targets, expected);
}

#[rstest]
fn task_linking_foreign_deliverable_is_not_stored(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("task_foreign_link");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repository = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();
    let workspace = seeded(&rt, &repository);
    let other = seeded(&rt, &repository);
    let foreign = other
        .deliverables
        .first()
        .expect("seeded deliverable")
        .id();
    let draft = task(&workspace, "Survey", StatusColumn::Todo, 0);

    let result = rt.block_on(repository.insert_task(&draft, &[foreign]));

    assert!(
        matches!(result, Err(WorkspaceRepositoryError::DeliverableNotFound(id)) if id == foreign),
        "Expected DeliverableNotFound error, got: {result:?}"
    );
    let stored = rt
        .block_on(repository.find_task(workspace.project.id(), draft.id()))
        .expect("lookup succeeds");
    assert!(stored.is_none());
}

#[rstest]
fn task_updates_roll_back_when_one_target_is_missing(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("updates_rollback");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repository = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();
    let workspace = seeded(&rt, &repository);
    let first = task(&workspace, "Survey", StatusColumn::Todo, 0);
    let second = task(&workspace, "Outline", StatusColumn::Todo, 1);
    for draft in [&first, &second] {
        rt.block_on(repository.insert_task(draft, &[]))
            .expect("task insert");
    }
    let missing = TaskId::new();
    let updates = [
        TaskUpdate::new(first.id(), StatusColumn::Done, 0),
        TaskUpdate::new(missing, StatusColumn::Done, 1),
    ];

    let result = rt.block_on(repository.apply_task_updates(workspace.project.id(), &updates));

    assert!(
        matches!(result, Err(WorkspaceRepositoryError::TaskNotFound(id)) if id == missing),
        "Expected TaskNotFound error, got: {result:?}"
    );
    assert_eq!(
        board(&rt, &repository, &workspace),
        vec![
            ("Survey".to_owned(), StatusColumn::Todo, 0),
            ("Outline".to_owned(), StatusColumn::Todo, 1),
        ]
    );
}

#[rstest]
fn task_updates_apply_together(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("updates_apply");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repository = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();
    let workspace = seeded(&rt, &repository);
    let first = task(&workspace, "Survey", StatusColumn::Todo, 0);
    let second = task(&workspace, "Outline", StatusColumn::Todo, 1);
    for draft in [&first, &second] {
        rt.block_on(repository.insert_task(draft, &[]))
            .expect("task insert");
    }
    let updates = [
        TaskUpdate::new(second.id(), StatusColumn::Todo, 0),
        TaskUpdate::new(first.id(), StatusColumn::Blocked, 0),
    ];

    rt.block_on(repository.apply_task_updates(workspace.project.id(), &updates))
        .expect("updates apply");

    assert_eq!(
        board(&rt, &repository, &workspace),
        vec![
            ("Outline".to_owned(), StatusColumn::Todo, 0),
            ("Survey".to_owned(), StatusColumn::Blocked, 0),
        ]
    );
}

#[rstest]
fn task_updates_cannot_reach_another_project(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("updates_scope");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repository = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();
    let workspace = seeded(&rt, &repository);
    let other = seeded(&rt, &repository);
    let foreign = task(&other, "Elsewhere", StatusColumn::Todo, 0);
    rt.block_on(repository.insert_task(&foreign, &[]))
        .expect("task insert");

    let result = rt.block_on(repository.apply_task_updates(
        workspace.project.id(),
        &[TaskUpdate::new(foreign.id(), StatusColumn::Done, 0)],
    ));

    assert!(
        matches!(result, Err(WorkspaceRepositoryError::TaskNotFound(id)) if id == foreign.id()),
        "Expected TaskNotFound error, got: {result:?}"
    );
    assert_eq!(
        board(&rt, &repository, &other),
        vec![("Elsewhere".to_owned(), StatusColumn::Todo, 0)]
    );
}

#[rstest]
fn saved_task_rolls_back_when_a_placement_is_missing(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("save_rollback");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repository = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();
    let workspace = seeded(&rt, &repository);
    let mut survey = task(&workspace, "Survey", StatusColumn::Todo, 0);
    rt.block_on(repository.insert_task(&survey, &[]))
        .expect("task insert");
    survey.rename("Literature survey");
    let missing = TaskId::new();

    let result = rt.block_on(
        repository.save_task(&survey, &[TaskUpdate::new(missing, StatusColumn::Todo, 1)]),
    );

    assert!(
        matches!(result, Err(WorkspaceRepositoryError::TaskNotFound(id)) if id == missing),
        "Expected TaskNotFound error, got: {result:?}"
    );
    assert_eq!(
        board(&rt, &repository, &workspace),
        vec![("Survey".to_owned(), StatusColumn::Todo, 0)]
    );

    rt.block_on(repository.save_task(&survey, &[]))
        .expect("save succeeds");
    assert_eq!(
        board(&rt, &repository, &workspace),
        vec![("Literature survey".to_owned(), StatusColumn::Todo, 0)]
    );
}

#[rstest]
fn deleted_task_closes_its_column_and_drops_links(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("task_delete");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repository = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();
    let workspace = seeded(&rt, &repository);
    let deliverable = workspace
        .deliverables
        .first()
        .expect("seeded deliverable")
        .id();
    let tasks = [
        task(&workspace, "Survey", StatusColumn::Todo, 0),
        task(&workspace, "Outline", StatusColumn::Todo, 1),
        task(&workspace, "Draft", StatusColumn::Todo, 2),
    ];
    for draft in &tasks {
        rt.block_on(repository.insert_task(draft, &[deliverable]))
            .expect("task insert");
    }
    let [survey, outline, draft] = &tasks;
    let placements = [
        TaskUpdate::new(outline.id(), StatusColumn::Todo, 0),
        TaskUpdate::new(draft.id(), StatusColumn::Todo, 1),
    ];

    rt.block_on(repository.delete_task(workspace.project.id(), survey.id(), &placements))
        .expect("delete succeeds");

    assert_eq!(
        board(&rt, &repository, &workspace),
        vec![
            ("Outline".to_owned(), StatusColumn::Todo, 0),
            ("Draft".to_owned(), StatusColumn::Todo, 1),
        ]
    );
    let links = rt
        .block_on(repository.list_links(workspace.project.id()))
        .expect("links load");
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|link| link.task_id != survey.id()));

    let again = rt.block_on(repository.delete_task(workspace.project.id(), survey.id(), &[]));
    assert!(
        matches!(again, Err(WorkspaceRepositoryError::TaskNotFound(id)) if id == survey.id()),
        "Expected TaskNotFound error, got: {again:?}"
    );
}
