//! Listing and lookup tests against the seeded fixture.

use crate::postgres::helpers::{seeded_store, test_runtime};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use task_store::task::domain::{TaskFilter, TaskId, UserId};
use task_store::task::ports::{TaskRepository, TaskRepositoryError};

fn ids(tasks: &[task_store::task::domain::Task]) -> Vec<i32> {
    tasks.iter().map(|task| task.id().value()).collect()
}

#[rstest]
fn list_all_tasks_returns_every_seeded_row(shared_test_cluster: &'static TestCluster) {
    let store = seeded_store(shared_test_cluster, "test_list_all");
    let rt = test_runtime();

    let mut all = ids(&rt.block_on(store.repo.list_all_tasks()).expect("list all"));
    all.sort_unstable();

    assert_eq!(all, vec![1, 2, 3, 4, 5]);
}

#[rstest]
fn get_task_matches_listing(shared_test_cluster: &'static TestCluster) {
    let store = seeded_store(shared_test_cluster, "test_get_matches");
    let rt = test_runtime();

    let all = rt.block_on(store.repo.list_all_tasks()).expect("list all");
    for listed in &all {
        let fetched = rt.block_on(store.repo.get_task(listed.id())).expect("get task");
        assert_eq!(&fetched, listed);
    }

    let closed = all
        .iter()
        .find(|task| task.id() == TaskId::new(3))
        .expect("task 3 seeded");
    assert!(!closed.is_open());
    assert_eq!(closed.closed(), 1_700_003_600);
    assert_eq!(closed.assigned_id(), UserId::new(3));
}

#[rstest]
fn get_task_reports_missing_id(shared_test_cluster: &'static TestCluster) {
    let store = seeded_store(shared_test_cluster, "test_get_missing");
    let rt = test_runtime();

    let result = rt.block_on(store.repo.get_task(TaskId::new(999)));

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == TaskId::new(999)
    ));
}

#[rstest]
#[case(UserId::new(4), vec![3, 4])]
#[case(UserId::new(1), vec![1])]
#[case(UserId::new(3), vec![])]
fn list_tasks_by_author_filters_on_author(
    shared_test_cluster: &'static TestCluster,
    #[case] author: UserId,
    #[case] expected: Vec<i32>,
) {
    let store = seeded_store(shared_test_cluster, "test_by_author");
    let rt = test_runtime();

    let tasks = rt
        .block_on(store.repo.list_tasks_by_author(author))
        .expect("list by author");

    assert_eq!(ids(&tasks), expected);
}

#[rstest]
#[case("Bug", vec![1])]
#[case("Feature", vec![2, 3])]
#[case("Docs", vec![])]
#[case("chore", vec![])]
fn list_tasks_by_label_joins_links(
    shared_test_cluster: &'static TestCluster,
    #[case] label: &str,
    #[case] expected: Vec<i32>,
) {
    let store = seeded_store(shared_test_cluster, "test_by_label");
    let rt = test_runtime();

    let tasks = rt
        .block_on(store.repo.list_tasks_by_label(label))
        .expect("list by label");

    assert_eq!(ids(&tasks), expected);
}

#[rstest]
fn list_tasks_by_label_rejects_empty_label(shared_test_cluster: &'static TestCluster) {
    let store = seeded_store(shared_test_cluster, "test_empty_label");
    let rt = test_runtime();

    let result = rt.block_on(store.repo.list_tasks_by_label(""));

    assert!(matches!(result, Err(TaskRepositoryError::EmptyLabel)));
}

#[rstest]
#[case(TaskFilter::all(), vec![1, 2, 3, 4, 5])]
#[case(TaskFilter::all().with_task_id(TaskId::new(2)), vec![2])]
#[case(TaskFilter::all().with_author_id(UserId::new(4)), vec![3, 4])]
#[case(
    TaskFilter::all().with_task_id(TaskId::new(1)).with_author_id(UserId::new(4)),
    vec![]
)]
#[case(TaskFilter::all().with_task_id(TaskId::new(42)), vec![])]
fn list_tasks_applies_optional_filters(
    shared_test_cluster: &'static TestCluster,
    #[case] filter: TaskFilter,
    #[case] expected: Vec<i32>,
) {
    let store = seeded_store(shared_test_cluster, "test_filter");
    let rt = test_runtime();

    let tasks = rt.block_on(store.repo.list_tasks(filter)).expect("list tasks");

    assert_eq!(ids(&tasks), expected);
}

#[rstest]
fn list_tasks_by_label_rejects_nul_bytes(shared_test_cluster: &'static TestCluster) {
    let store = seeded_store(shared_test_cluster, "test_nul_label");
    let rt = test_runtime();

    let result = rt.block_on(store.repo.list_tasks_by_label("Bug\0"));

    assert!(matches!(result, Err(TaskRepositoryError::Persistence(_))));
}
