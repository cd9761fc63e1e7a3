//! Given steps for kanban reordering BDD scenarios.

use super::world::{ReorderWorld, column, run_async};
use eyre::WrapErr;
use phaseboard::workspace::services::CreateTaskRequest;
use rstest_bdd_macros::given;

#[given("a bootstrapped thesis workspace")]
fn bootstrapped_workspace(world: &mut ReorderWorld) -> Result<(), eyre::Report> {
    run_async(world.service.bootstrap(world.owner)).wrap_err("bootstrap workspace")?;
    let timeline =
        run_async(world.service.timeline(world.owner)).wrap_err("load seeded phases")?;
    world.phases = timeline.phases;
    Ok(())
}

#[given(r#"a task "{title}" in the "{column_name}" column"#)]
fn task_in_column(
    world: &mut ReorderWorld,
    title: String,
    column_name: String,
) -> Result<(), eyre::Report> {
    let phase = world
        .phases
        .get(1)
        .ok_or_else(|| eyre::eyre!("missing implementation phase in scenario world"))?;
    let request = CreateTaskRequest::new(phase.id(), title.as_str(), "2026-03-02", "2026-03-06")
        .with_status_column(column(&column_name)?);
    let task = run_async(world.service.create_task(world.owner, request))
        .wrap_err("create task for reorder scenario")?;
    world.tasks.insert(title, task.id());
    Ok(())
}
