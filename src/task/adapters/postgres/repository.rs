//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::{labels, tasks, tasks_labels},
};
use crate::database::{DatabaseError, TaskDatabase};
use crate::task::{
    domain::{LabelName, NewTask, Task, TaskBatch, TaskFilter, TaskId, TaskUpdate, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use tracing::{debug, warn};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    database: TaskDatabase,
}

impl PostgresTaskRepository {
    /// Creates a repository over an established database handle.
    #[must_use]
    pub const fn new(database: TaskDatabase) -> Self {
        Self { database }
    }

    /// Returns the underlying database handle.
    #[must_use]
    pub const fn database(&self) -> &TaskDatabase {
        &self.database
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.database.pool()?;
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list_tasks(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        debug!(?filter, "listing tasks");
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::id.asc())
                .into_boxed();
            if let Some(task_id) = filter.task_id {
                query = query.filter(tasks::id.eq(task_id.value()));
            }
            if let Some(author_id) = filter.author_id {
                query = query.filter(tasks::author_id.eq(author_id.value()));
            }
            load_tasks(query.load::<TaskRow>(connection))
        })
        .await
    }

    async fn list_all_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        debug!("listing all tasks");
        self.run_blocking(|connection| {
            load_tasks(
                tasks::table
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(connection),
            )
        })
        .await
    }

    async fn get_task(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        debug!(task_id = %id, "fetching task");
        self.run_blocking(move |connection| {
            tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .map(Task::from)
                .ok_or(TaskRepositoryError::NotFound(id))
        })
        .await
    }

    async fn list_tasks_by_author(&self, author_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        debug!(author_id = %author_id, "listing tasks by author");
        self.run_blocking(move |connection| {
            load_tasks(
                tasks::table
                    .filter(tasks::author_id.eq(author_id.value()))
                    .select(TaskRow::as_select())
                    .order(tasks::id.asc())
                    .load::<TaskRow>(connection),
            )
        })
        .await
    }

    async fn list_tasks_by_label(&self, label: &str) -> TaskRepositoryResult<Vec<Task>> {
        let label_name = LabelName::new(label)?;
        debug!(label = %label_name, "listing tasks by label");
        self.run_blocking(move |connection| {
            load_tasks(
                tasks_labels::table
                    .inner_join(tasks::table)
                    .inner_join(labels::table)
                    .filter(labels::name.eq(label_name.as_str()))
                    .select(TaskRow::as_select())
                    .order(tasks::id.asc())
                    .load::<TaskRow>(connection),
            )
        })
        .await
    }

    async fn create_task(&self, task: &NewTask) -> TaskRepositoryResult<TaskId> {
        let row = NewTaskRow::from(task.clone());
        let id = self
            .run_blocking(move |connection| {
                insert_task(connection, &row).map_err(TaskRepositoryError::persistence)
            })
            .await?;
        debug!(task_id = %id, "created task");
        Ok(id)
    }

    async fn create_tasks(&self, tasks: &[NewTask]) -> TaskRepositoryResult<Vec<TaskId>> {
        let batch = TaskBatch::new(tasks.to_vec())?;
        let batch_size = batch.len();
        let ids = self
            .run_blocking(move |connection| {
                connection
                    .transaction::<_, DieselError, _>(|transaction| {
                        let mut ids = Vec::with_capacity(batch.len());
                        for task in batch {
                            ids.push(insert_task(transaction, &NewTaskRow::from(task))?);
                        }
                        Ok(ids)
                    })
                    .map_err(TaskRepositoryError::persistence)
            })
            .await
            .inspect_err(|err| warn!(batch_size, error = %err, "task batch rolled back"))?;
        debug!(batch_size, "created task batch");
        Ok(ids)
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskRepositoryResult<()> {
        if update.is_empty() {
            if self.database.is_closed() {
                return Err(DatabaseError::Closed.into());
            }
            debug!(task_id = %id, "empty task update skipped");
            return Ok(());
        }

        let changeset = TaskChangeset::from(update);
        let affected = self
            .run_blocking(move |connection| {
                diesel::update(tasks::table.find(id.value()))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)
            })
            .await?;
        debug!(task_id = %id, affected, "updated task");
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let affected = self
            .run_blocking(move |connection| {
                connection
                    .transaction::<_, DieselError, _>(|transaction| {
                        diesel::delete(
                            tasks_labels::table.filter(tasks_labels::task_id.eq(id.value())),
                        )
                        .execute(transaction)?;
                        diesel::delete(tasks::table.find(id.value())).execute(transaction)
                    })
                    .map_err(TaskRepositoryError::persistence)
            })
            .await?;
        debug!(task_id = %id, affected, "deleted task");
        Ok(())
    }
}

fn load_tasks(rows: QueryResult<Vec<TaskRow>>) -> TaskRepositoryResult<Vec<Task>> {
    rows.map(|loaded| loaded.into_iter().map(Task::from).collect())
        .map_err(TaskRepositoryError::persistence)
}

fn insert_task(connection: &mut PgConnection, row: &NewTaskRow) -> QueryResult<TaskId> {
    diesel::insert_into(tasks::table)
        .values(row)
        .returning(tasks::id)
        .get_result::<i32>(connection)
        .map(TaskId::new)
}
