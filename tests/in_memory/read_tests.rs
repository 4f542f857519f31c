//! Listing and lookup tests for the in-memory store.

use crate::in_memory::helpers::{SeededRepository, ids, seeded};
use rstest::rstest;
use task_store::task::domain::{TaskFilter, TaskId, UserId};
use task_store::task::ports::{TaskRepository, TaskRepositoryError};

#[rstest]
#[tokio::test]
async fn get_task_matches_every_listed_task(seeded: SeededRepository) {
    let all = seeded.list_all_tasks().await.expect("list all");
    assert_eq!(all.len(), 5);

    for listed in &all {
        let fetched = seeded.get_task(listed.id()).await.expect("get task");
        assert_eq!(&fetched, listed);
    }
}

#[rstest]
#[tokio::test]
async fn get_task_reports_missing_id(seeded: SeededRepository) {
    let result = seeded.get_task(TaskId::new(999)).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == TaskId::new(999)
    ));
}

#[rstest]
#[tokio::test]
async fn closed_task_exposes_completion_time(seeded: SeededRepository) {
    let task = seeded.get_task(TaskId::new(3)).await.expect("task 3");

    assert!(!task.is_open());
    assert_eq!(
        task.closed_at().map(|at| at.timestamp()),
        Some(1_700_003_600)
    );
    let open = seeded.get_task(TaskId::new(1)).await.expect("task 1");
    assert!(open.closed_at().is_none());
}

#[rstest]
#[case(4, vec![3, 4])]
#[case(2, vec![2])]
#[case(3, vec![])]
#[tokio::test]
async fn list_tasks_by_author_filters_on_author(
    seeded: SeededRepository,
    #[case] author: i32,
    #[case] expected: Vec<i32>,
) {
    let tasks = seeded
        .list_tasks_by_author(UserId::new(author))
        .await
        .expect("list by author");

    assert_eq!(ids(&tasks), expected);
}

#[rstest]
#[case("Bug", vec![1])]
#[case("Feature", vec![2, 3])]
#[case("Docs", vec![])]
#[case("chore", vec![])]
#[case("bug", vec![])]
#[tokio::test]
async fn list_tasks_by_label_follows_links(
    seeded: SeededRepository,
    #[case] label: &str,
    #[case] expected: Vec<i32>,
) {
    let tasks = seeded
        .list_tasks_by_label(label)
        .await
        .expect("list by label");

    assert_eq!(ids(&tasks), expected);
}

#[rstest]
#[tokio::test]
async fn list_tasks_by_label_rejects_empty_label(seeded: SeededRepository) {
    let result = seeded.list_tasks_by_label("").await;

    assert!(matches!(result, Err(TaskRepositoryError::EmptyLabel)));
}

#[rstest]
#[case(TaskFilter::all(), vec![1, 2, 3, 4, 5])]
#[case(TaskFilter::all().with_task_id(TaskId::new(5)), vec![5])]
#[case(TaskFilter::all().with_author_id(UserId::new(4)), vec![3, 4])]
#[case(
    TaskFilter::all().with_task_id(TaskId::new(3)).with_author_id(UserId::new(4)),
    vec![3]
)]
#[case(
    TaskFilter::all().with_task_id(TaskId::new(1)).with_author_id(UserId::new(4)),
    vec![]
)]
#[tokio::test]
async fn list_tasks_applies_optional_filters(
    seeded: SeededRepository,
    #[case] filter: TaskFilter,
    #[case] expected: Vec<i32>,
) {
    let tasks = seeded.list_tasks(filter).await.expect("list tasks");

    assert_eq!(ids(&tasks), expected);
}
