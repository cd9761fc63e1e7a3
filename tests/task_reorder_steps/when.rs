//! When steps for kanban reordering BDD scenarios.

use super::world::{ReorderWorld, column, run_async};
use phaseboard::workspace::{domain::TaskId, services::ReorderTaskRequest};
use rstest_bdd_macros::when;

fn attempt_move(
    world: &mut ReorderWorld,
    task_id: TaskId,
    column_name: &str,
    position: &str,
) -> Result<(), eyre::Report> {
    let target_index: i64 = position
        .parse()
        .map_err(|err| eyre::eyre!("invalid position '{position}' in scenario: {err}"))?;
    let request = ReorderTaskRequest::new(task_id, column(column_name)?, target_index);
    let result = run_async(world.service.reorder_task(world.owner, request));
    world.last_error = result.err();
    Ok(())
}

#[when(r#"task "{title}" is moved to the "{column_name}" column at position {position}"#)]
fn move_task(
    world: &mut ReorderWorld,
    title: String,
    column_name: String,
    position: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    attempt_move(world, task_id, &column_name, &position)?;
    if let Some(err) = world.last_error.as_ref() {
        return Err(eyre::eyre!("move of '{title}' failed: {err}"));
    }
    Ok(())
}

#[when(r#"an unknown task is moved to the "{column_name}" column at position {position}"#)]
fn move_unknown_task(
    world: &mut ReorderWorld,
    column_name: String,
    position: String,
) -> Result<(), eyre::Report> {
    attempt_move(world, TaskId::new(), &column_name, &position)
}
