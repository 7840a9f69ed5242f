//! Given steps for task completion BDD scenarios.

use super::world::{CompletionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use scheduler::task::{
    domain::{TaskId, TaskRecord},
    services::TaskRequest,
};

/// Identifier given to rows planted directly in the store.
const STORED_TASK_ID: i64 = 1;

#[given(r#"today is "{day}""#)]
fn today_is(world: &mut CompletionWorld, day: String) {
    world.today = Some(day);
}

#[given(r#"a one-shot task "{title}" due "{date}""#)]
fn one_shot_task(
    world: &mut CompletionWorld,
    title: String,
    date: String,
) -> Result<(), eyre::Report> {
    let service = world.service()?;
    let created = run_async(service.create(TaskRequest::new(title).with_date(date)))
        .wrap_err("create one-shot task")?;
    world.task_id = Some(created.id());
    Ok(())
}

#[given(r#"a task "{title}" due "{date}" repeating "{repeat}""#)]
fn recurring_task(
    world: &mut CompletionWorld,
    title: String,
    date: String,
    repeat: String,
) -> Result<(), eyre::Report> {
    let service = world.service()?;
    let request = TaskRequest::new(title).with_date(date).with_repeat(repeat);
    let created = run_async(service.create(request)).wrap_err("create recurring task")?;
    world.task_id = Some(created.id());
    Ok(())
}

#[given(r#"a stored task "{title}" due "{date}" repeating "{repeat}""#)]
fn stored_task(
    world: &mut CompletionWorld,
    title: String,
    date: String,
    repeat: String,
) -> Result<(), eyre::Report> {
    let id = TaskId::new(STORED_TASK_ID)?;
    world
        .repository
        .seed_record(TaskRecord {
            id,
            date,
            title,
            comment: String::new(),
            repeat,
        })
        .wrap_err("seed stored task")?;
    world.task_id = Some(id);
    Ok(())
}
