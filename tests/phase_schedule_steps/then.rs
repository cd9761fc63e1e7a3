//! Then steps for phase schedule BDD scenarios.

use super::world::{ScheduleWorld, run_async};
use rstest_bdd_macros::then;

#[then("the schedule is accepted")]
fn schedule_accepted(world: &ScheduleWorld) -> Result<(), eyre::Report> {
    match world.schedule_result.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected schedule to be accepted, got {err}")),
        None => Err(eyre::eyre!("no schedule was submitted")),
    }
}

#[then(r#"the schedule is rejected with "{message}""#)]
fn schedule_rejected(world: &ScheduleWorld, message: String) -> Result<(), eyre::Report> {
    match world.schedule_result.as_ref() {
        Some(Err(err)) if err.to_string() == message => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected '{message}', got '{err}'")),
        Some(Ok(_)) => Err(eyre::eyre!("expected rejection '{message}', schedule was accepted")),
        None => Err(eyre::eyre!("no schedule was submitted")),
    }
}

#[then(r#"the project runs from "{start_date}" to "{end_date}""#)]
fn project_window(
    world: &ScheduleWorld,
    start_date: String,
    end_date: String,
) -> Result<(), eyre::Report> {
    let project = run_async(world.service.project(world.owner))
        .map_err(|err| eyre::eyre!("project failed to load: {err}"))?;
    let window = project.window();
    let actual = (window.start_date().to_string(), window.end_date().to_string());
    if actual != (start_date.clone(), end_date.clone()) {
        return Err(eyre::eyre!(
            "expected project window {start_date}..{end_date}, found {}..{}",
            actual.0,
            actual.1
        ));
    }
    Ok(())
}

#[then(r#"the task is rejected with "{message}""#)]
fn task_rejected(world: &ScheduleWorld, message: String) -> Result<(), eyre::Report> {
    match world.task_error.as_deref() {
        Some(actual) if actual == message => Ok(()),
        Some(actual) => Err(eyre::eyre!("expected '{message}', got '{actual}'")),
        None => Err(eyre::eyre!("expected task rejection '{message}', task was created")),
    }
}
