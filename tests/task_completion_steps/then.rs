//! Then steps for task completion BDD scenarios.

use super::world::{CompletionWorld, run_async};
use rstest_bdd_macros::then;
use scheduler::task::{ports::TaskRepository, services::TaskErrorKind};

#[then(r#"the task is due "{date}""#)]
fn task_is_due(world: &CompletionWorld, date: String) -> Result<(), eyre::Report> {
    let service = world.service()?;
    let task = run_async(service.find_by_id(world.task_id()?))?;
    eyre::ensure!(
        task.date().to_string() == date,
        "expected due date {date}, found {}",
        task.date()
    );
    Ok(())
}

#[then("the task no longer exists")]
fn task_no_longer_exists(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let service = world.service()?;
    match run_async(service.find_by_id(world.task_id()?)) {
        Err(err) if err.kind() == TaskErrorKind::NotFound => Ok(()),
        other => Err(eyre::eyre!("expected task to be gone, got {other:?}")),
    }
}

#[then("the task still exists")]
fn task_still_exists(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let record = run_async(world.repository.find_by_id(id))?;
    eyre::ensure!(record.is_some(), "task {id} was removed");
    Ok(())
}

fn completion_error_kind(world: &CompletionWorld) -> Result<TaskErrorKind, eyre::Report> {
    match world.last_completion.as_ref() {
        Some(Err(err)) => Ok(err.kind()),
        Some(Ok(outcome)) => Err(eyre::eyre!("expected failure, got {outcome:?}")),
        None => Err(eyre::eyre!("no completion was attempted")),
    }
}

#[then("the completion fails with a validation error")]
fn completion_fails_validation(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let kind = completion_error_kind(world)?;
    eyre::ensure!(kind == TaskErrorKind::Validation, "got {kind:?}");
    Ok(())
}

#[then("the completion fails with a not found error")]
fn completion_fails_not_found(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let kind = completion_error_kind(world)?;
    eyre::ensure!(kind == TaskErrorKind::NotFound, "got {kind:?}");
    Ok(())
}
