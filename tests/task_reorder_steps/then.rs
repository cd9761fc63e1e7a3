//! Then steps for kanban reordering BDD scenarios.

use super::world::{ReorderWorld, column, run_async};
use phaseboard::{planning::ReorderError, workspace::services::WorkspaceServiceError};
use rstest_bdd_macros::then;

fn column_titles(world: &ReorderWorld, column_name: &str) -> Result<Vec<String>, eyre::Report> {
    let status_column = column(column_name)?;
    let board = run_async(world.service.board(world.owner))
        .map_err(|err| eyre::eyre!("board failed to load: {err}"))?;
    let titles: Vec<String> = board
        .column(status_column)
        .map(|entry| entry.task.title().to_owned())
        .collect();
    let ranks: Vec<u32> = board
        .column(status_column)
        .map(|entry| entry.task.column_order())
        .collect();
    let dense: Vec<u32> = (0_u32..).take(ranks.len()).collect();
    if ranks != dense {
        return Err(eyre::eyre!(
            "{column_name} ranks are not dense: {ranks:?}"
        ));
    }
    Ok(titles)
}

#[then(r#"the "{column_name}" column reads "{expected}""#)]
fn column_reads(
    world: &ReorderWorld,
    column_name: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let actual = column_titles(world, &column_name)?.join(", ");
    if actual != expected {
        return Err(eyre::eyre!(
            "expected {column_name} to read '{expected}', found '{actual}'"
        ));
    }
    Ok(())
}

#[then(r#"the "{column_name}" column is empty"#)]
fn column_is_empty(world: &ReorderWorld, column_name: String) -> Result<(), eyre::Report> {
    let titles = column_titles(world, &column_name)?;
    if !titles.is_empty() {
        return Err(eyre::eyre!("expected {column_name} to be empty, found {titles:?}"));
    }
    Ok(())
}

#[then("the move is rejected as task not found")]
fn move_rejected(world: &ReorderWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(WorkspaceServiceError::Reorder(ReorderError::TaskNotFound(_))) => Ok(()),
        other => Err(eyre::eyre!("expected TaskNotFound rejection, got {other:?}")),
    }
}
