//! Connection manager tests: connect, ping, and close.

use crate::postgres::helpers::{config_for, seeded_store, test_runtime};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use std::time::Duration;
use task_store::database::{DatabaseError, TaskDatabase};
use task_store::task::domain::{TaskFilter, TaskId};
use task_store::task::ports::{TaskRepository, TaskRepositoryError};

#[rstest]
fn connect_then_ping_succeeds(shared_test_cluster: &'static TestCluster) {
    let config = config_for(shared_test_cluster, "postgres").expect("config");
    let rt = test_runtime();

    let database = rt.block_on(TaskDatabase::connect(&config)).expect("connect");
    rt.block_on(database.ping()).expect("ping");

    assert!(!database.is_closed());
    database.close();
}

#[rstest]
fn connect_to_missing_database_fails(shared_test_cluster: &'static TestCluster) {
    let mut config = config_for(shared_test_cluster, "task_store_missing").expect("config");
    config.connect_timeout_secs = 1;
    let rt = test_runtime();

    let result = rt.block_on(TaskDatabase::connect(&config));

    assert!(matches!(result, Err(DatabaseError::Connection(_))));
}

#[rstest]
fn close_is_idempotent_and_later_calls_fail(shared_test_cluster: &'static TestCluster) {
    let store = seeded_store(shared_test_cluster, "test_close");
    let rt = test_runtime();

    store.repo.database().close();
    store.repo.database().close();

    assert!(store.repo.database().is_closed());
    assert!(matches!(
        rt.block_on(store.repo.database().ping()),
        Err(DatabaseError::Closed)
    ));
    assert!(matches!(
        rt.block_on(store.repo.list_tasks(TaskFilter::all())),
        Err(TaskRepositoryError::Database(DatabaseError::Closed))
    ));
    assert!(matches!(
        rt.block_on(store.repo.delete_task(TaskId::new(1))),
        Err(TaskRepositoryError::Database(DatabaseError::Closed))
    ));
}

#[rstest]
fn ping_reports_unreachable_server() {
    let manager = ConnectionManager::<PgConnection>::new("postgres://postgres@127.0.0.1:1/tasks");
    let pool = Pool::builder()
        .connection_timeout(Duration::from_secs(1))
        .build_unchecked(manager);
    let database = TaskDatabase::from_pool(pool);
    let rt = test_runtime();

    let result = rt.block_on(database.ping());

    assert!(matches!(result, Err(DatabaseError::Unreachable(_))));
}
