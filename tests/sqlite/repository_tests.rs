//! Storage contract tests for the Diesel `SQLite` repository.

use chrono::NaiveDate;
use rstest::rstest;
use scheduler::task::{
    domain::{TaskFields, TaskFilter, TaskId, TaskQuery, TaskRecord},
    ports::TaskRepository,
};

use super::helpers::{BoxError, SqliteContext, context};

fn fields(date: &str, title: &str, comment: &str, repeat: &str) -> Result<TaskFields, BoxError> {
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid reference day")?;
    Ok(TaskFields::normalize(today, date, title, comment, repeat)?)
}

fn titles(records: &[TaskRecord]) -> Vec<&str> {
    records.iter().map(|record| record.title.as_str()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_then_find_returns_stored_row(
    #[future] context: Result<SqliteContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let stored = fields("20240301", "Dentist", "bring card", "y")?;

    let id = ctx.repository.insert(&stored).await?;
    let found = ctx.repository.find_by_id(id).await?;

    assert_eq!(found, Some(TaskRecord::from_fields(id, &stored)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_increase_and_are_not_reused(
    #[future] context: Result<SqliteContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let first = ctx.repository.insert(&fields("", "One", "", "")?).await?;
    let second = ctx.repository.insert(&fields("", "Two", "", "")?).await?;
    assert!(second > first);

    ctx.repository.delete_by_id(second).await?;
    let third = ctx.repository.insert(&fields("", "Three", "", "")?).await?;
    assert!(third > second);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutations_report_affected_rows(
    #[future] context: Result<SqliteContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let id = ctx.repository.insert(&fields("", "Draft", "", "")?).await?;
    let missing = TaskId::new(id.value() + 100)?;
    let replacement = fields("20240210", "Final", "done", "d 14")?;

    assert_eq!(ctx.repository.update_by_id(id, &replacement).await?, 1);
    assert_eq!(ctx.repository.update_by_id(missing, &replacement).await?, 0);
    assert_eq!(
        ctx.repository.find_by_id(id).await?,
        Some(TaskRecord::from_fields(id, &replacement))
    );

    assert_eq!(ctx.repository.delete_by_id(id).await?, 1);
    assert_eq!(ctx.repository.delete_by_id(id).await?, 0);
    assert_eq!(ctx.repository.find_by_id(id).await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_by_date_then_id_and_applies_limit(
    #[future] context: Result<SqliteContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    for (date, title) in [
        ("20240305", "C"),
        ("20240105", "A"),
        ("20240305", "D"),
        ("20240201", "B"),
    ] {
        ctx.repository.insert(&fields(date, title, "", "")?).await?;
    }

    let all = ctx.repository.list(&TaskQuery::new(50)).await?;
    let limited = ctx.repository.list(&TaskQuery::new(2)).await?;

    assert_eq!(titles(&all), ["A", "B", "C", "D"]);
    assert_eq!(titles(&limited), ["A", "B"]);
    Ok(())
}

#[rstest]
#[case("milk", &["Buy milk", "Errands"])]
#[case("MILK", &["Buy milk", "Errands"])]
#[case("50%", &["50% sale"])]
#[case("a_b", &["a_b notes"])]
#[case("zzz", &[])]
#[tokio::test(flavor = "multi_thread")]
async fn text_search_matches_title_or_comment_literally(
    #[future] context: Result<SqliteContext, BoxError>,
    #[case] search: &str,
    #[case] expected: &[&str],
) -> Result<(), BoxError> {
    let ctx = context.await?;
    for (date, title, comment) in [
        ("20240110", "Buy milk", ""),
        ("20240111", "Errands", "milk and bread"),
        ("20240112", "50% sale", ""),
        ("20240113", "500 sale", ""),
        ("20240114", "a_b notes", ""),
        ("20240115", "axb notes", ""),
    ] {
        ctx.repository
            .insert(&fields(date, title, comment, "")?)
            .await?;
    }

    let query = TaskQuery::new(50).with_filter(TaskFilter::from_search(search));
    let found = ctx.repository.list(&query).await?;

    assert_eq!(titles(&found), expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn date_search_matches_exact_day(
    #[future] context: Result<SqliteContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    ctx.repository
        .insert(&fields("20240120", "Match", "", "")?)
        .await?;
    ctx.repository
        .insert(&fields("20240121", "Other", "", "")?)
        .await?;

    let query = TaskQuery::new(50).with_filter(TaskFilter::from_search("20.01.2024"));
    let found = ctx.repository.list(&query).await?;

    assert_eq!(titles(&found), ["Match"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initialize_is_idempotent_and_keeps_rows(
    #[future] context: Result<SqliteContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let id = ctx.repository.insert(&fields("", "Keep", "", "")?).await?;

    ctx.repository.initialize().await?;

    assert!(ctx.repository.find_by_id(id).await?.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_rows_are_returned_verbatim(
    #[future] context: Result<SqliteContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    ctx.insert_raw(7, "tomorrow", "Legacy", "weekly")?;

    let found = ctx
        .repository
        .find_by_id(TaskId::new(7)?)
        .await?
        .ok_or("row should exist")?;

    assert_eq!(found.date, "tomorrow");
    assert_eq!(found.repeat, "weekly");
    Ok(())
}
