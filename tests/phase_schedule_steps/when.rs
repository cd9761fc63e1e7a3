//! When steps for phase schedule BDD scenarios.

use super::world::{ScheduleWorld, run_async};
use phaseboard::workspace::services::{
    CreateTaskRequest, PhaseScheduleEntry, UpdatePhasesRequest,
};
use rstest_bdd_macros::when;

/// Parses `"start..end, start..end"` into date pairs.
fn parse_ranges(ranges: &str) -> Result<Vec<(String, String)>, eyre::Report> {
    ranges
        .split(',')
        .map(|range| {
            range
                .trim()
                .split_once("..")
                .map(|(start, end)| (start.to_owned(), end.to_owned()))
                .ok_or_else(|| eyre::eyre!("invalid date range '{range}' in scenario"))
        })
        .collect()
}

#[when(r#"the phases are scheduled as "{ranges}""#)]
fn schedule_phases(world: &mut ScheduleWorld, ranges: String) -> Result<(), eyre::Report> {
    let dates = parse_ranges(&ranges)?;
    if dates.len() != world.phases.len() {
        return Err(eyre::eyre!(
            "scenario lists {} ranges for {} phases",
            dates.len(),
            world.phases.len()
        ));
    }
    let entries = world
        .phases
        .iter()
        .zip(dates)
        .map(|(phase, (start, end))| PhaseScheduleEntry::new(phase.id(), phase.name(), start, end));
    let request = UpdatePhasesRequest::new(entries);
    world.schedule_result = Some(run_async(
        world.service.update_phases(world.owner, request),
    ));
    Ok(())
}

#[when(r#"a task "{title}" is planned from "{start_at}" to "{end_at}""#)]
fn plan_task(
    world: &mut ScheduleWorld,
    title: String,
    start_at: String,
    end_at: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(world.phase(0)?.id(), title, start_at, end_at);
    let result = run_async(world.service.create_task(world.owner, request));
    world.task_error = result.err().map(|err| err.to_string());
    Ok(())
}
