//! In-memory task repository mirroring the `PostgreSQL` schema rules.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::debug;

use crate::task::{
    domain::{
        Label, LabelId, LabelName, NewTask, OPEN, PersistedTaskData, Task, TaskBatch, TaskFilter,
        TaskId, TaskUpdate, User, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Constraint failures reported by [`InMemoryTaskRepository`].
///
/// These mirror the errors the database raises for the same inputs and are
/// surfaced as [`TaskRepositoryError::Persistence`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InMemoryStoreError {
    /// A task references a user that does not exist.
    #[error("foreign key violation: user {0} does not exist")]
    UnknownUser(UserId),
    /// A label link references a task that does not exist.
    #[error("foreign key violation: task {0} does not exist")]
    UnknownTask(TaskId),
    /// A label link references a label that does not exist.
    #[error("foreign key violation: label {0} does not exist")]
    UnknownLabel(LabelId),
    /// A row with the same key already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    /// Text columns cannot hold NUL bytes.
    #[error("invalid byte sequence: text contains NUL")]
    NulByte,
    /// A serial column has run past the largest `INTEGER`.
    #[error("sequence for {0} exhausted")]
    IdExhausted(&'static str),
    /// The state lock was poisoned by a panicking writer.
    #[error("state lock poisoned: {0}")]
    Poisoned(String),
}

/// Thread-safe in-memory task repository.
///
/// Starts with the sentinel `default` user (id 0) so unassigned tasks are
/// valid, exactly like the shipped schema.
pub struct InMemoryTaskRepository<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryTaskRepository<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskRepository")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    users: BTreeMap<UserId, String>,
    labels: BTreeMap<LabelId, String>,
    links: BTreeSet<(TaskId, LabelId)>,
    next_task_id: i64,
    next_label_id: i64,
}

impl Default for InMemoryTaskState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            users: BTreeMap::from([(UserId::UNASSIGNED, "default".to_owned())]),
            labels: BTreeMap::new(),
            links: BTreeSet::new(),
            next_task_id: 1,
            next_label_id: 1,
        }
    }
}

impl InMemoryTaskState {
    fn ensure_user(&self, id: UserId) -> Result<(), InMemoryStoreError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(InMemoryStoreError::UnknownUser(id))
        }
    }

    fn allocate_task_id(&mut self) -> Result<TaskId, InMemoryStoreError> {
        let id = i32::try_from(self.next_task_id)
            .map(TaskId::new)
            .map_err(|_| InMemoryStoreError::IdExhausted("tasks.id"))?;
        if self.tasks.contains_key(&id) {
            return Err(InMemoryStoreError::DuplicateKey(format!("tasks.id={id}")));
        }
        self.next_task_id += 1;
        Ok(id)
    }

    /// Hands out `count` consecutive task ids, or none at all.
    fn reserve_task_ids(&mut self, count: usize) -> Result<Vec<TaskId>, InMemoryStoreError> {
        let start = self.next_task_id;
        let reserved = (0..count)
            .map(|_| self.allocate_task_id())
            .collect::<Result<Vec<_>, _>>();
        if reserved.is_err() {
            self.next_task_id = start;
        }
        reserved
    }

    fn allocate_label_id(&mut self) -> Result<LabelId, InMemoryStoreError> {
        let id = i32::try_from(self.next_label_id)
            .map(LabelId::new)
            .map_err(|_| InMemoryStoreError::IdExhausted("labels.id"))?;
        self.next_label_id += 1;
        Ok(id)
    }

    fn insert_new(&mut self, id: TaskId, task: NewTask, opened: i64) {
        let NewTask { title, content } = task;
        self.tasks.insert(
            id,
            Task::from_persisted(PersistedTaskData {
                id,
                opened,
                closed: OPEN,
                author_id: UserId::UNASSIGNED,
                assigned_id: UserId::UNASSIGNED,
                title,
                content,
            }),
        );
    }
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository stamping new tasks with `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock: Arc::new(clock),
        }
    }

    /// Adds a user row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the id is taken.
    pub fn insert_user(&self, user: User) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.users.contains_key(&user.id) {
            return Err(store_error(InMemoryStoreError::DuplicateKey(format!(
                "users.id={}",
                user.id
            ))));
        }
        state.users.insert(user.id, user.name);
        Ok(())
    }

    /// Adds a label row and returns its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the state lock is
    /// poisoned or the label sequence is exhausted.
    pub fn insert_label(&self, name: impl Into<String>) -> TaskRepositoryResult<Label> {
        let mut state = self.write_state()?;
        let id = state.allocate_label_id().map_err(store_error)?;
        let label_name: String = name.into();
        state.labels.insert(id, label_name.clone());
        Ok(Label {
            id,
            name: label_name,
        })
    }

    /// Stores a fully specified task row, keeping its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the id is taken or
    /// the author or assignee does not exist.
    pub fn insert_task(&self, data: PersistedTaskData) -> TaskRepositoryResult<TaskId> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&data.id) {
            return Err(store_error(InMemoryStoreError::DuplicateKey(format!(
                "tasks.id={}",
                data.id
            ))));
        }
        state.ensure_user(data.author_id).map_err(store_error)?;
        state.ensure_user(data.assigned_id).map_err(store_error)?;
        let id = data.id;
        state.next_task_id = state.next_task_id.max(i64::from(id.value()) + 1);
        state.tasks.insert(id, Task::from_persisted(data));
        Ok(id)
    }

    /// Links a task to a label.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when either side does
    /// not exist or the link is already present.
    pub fn link_label(&self, task_id: TaskId, label_id: LabelId) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&task_id) {
            return Err(store_error(InMemoryStoreError::UnknownTask(task_id)));
        }
        if !state.labels.contains_key(&label_id) {
            return Err(store_error(InMemoryStoreError::UnknownLabel(label_id)));
        }
        if !state.links.insert((task_id, label_id)) {
            return Err(store_error(InMemoryStoreError::DuplicateKey(format!(
                "tasks_labels=({task_id}, {label_id})"
            ))));
        }
        Ok(())
    }

    /// Counts label links still pointing at `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn label_link_count(&self, task_id: TaskId) -> TaskRepositoryResult<usize> {
        let state = self.read_state()?;
        Ok(state.links.iter().filter(|(id, _)| *id == task_id).count())
    }

    fn now(&self) -> i64 {
        self.clock.utc().timestamp()
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| store_error(InMemoryStoreError::Poisoned(err.to_string())))
    }

    fn write_state(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| store_error(InMemoryStoreError::Poisoned(err.to_string())))
    }
}

fn store_error(err: InMemoryStoreError) -> TaskRepositoryError {
    TaskRepositoryError::persistence(err)
}

fn ensure_text(text: &str) -> TaskRepositoryResult<()> {
    if text.contains('\0') {
        return Err(store_error(InMemoryStoreError::NulByte));
    }
    Ok(())
}

fn ensure_new_task(task: &NewTask) -> TaskRepositoryResult<()> {
    ensure_text(&task.title)?;
    ensure_text(&task.content)
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn list_tasks(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect())
    }

    async fn list_all_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn get_task(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let state = self.read_state()?;
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn list_tasks_by_author(&self, author_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.list_tasks(TaskFilter::all().with_author_id(author_id))
            .await
    }

    async fn list_tasks_by_label(&self, label: &str) -> TaskRepositoryResult<Vec<Task>> {
        let wanted = LabelName::new(label)?;
        ensure_text(wanted.as_str())?;
        let state = self.read_state()?;
        let label_ids: BTreeSet<LabelId> = state
            .labels
            .iter()
            .filter(|(_, name)| name.as_str() == wanted.as_str())
            .map(|(id, _)| *id)
            .collect();
        Ok(state
            .links
            .iter()
            .filter(|(_, label_id)| label_ids.contains(label_id))
            .filter_map(|(task_id, _)| state.tasks.get(task_id).cloned())
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> TaskRepositoryResult<TaskId> {
        ensure_new_task(task)?;
        let opened = self.now();
        let mut state = self.write_state()?;
        let id = state.allocate_task_id().map_err(store_error)?;
        state.insert_new(id, task.clone(), opened);
        debug!(task_id = %id, "created task");
        Ok(id)
    }

    async fn create_tasks(&self, tasks: &[NewTask]) -> TaskRepositoryResult<Vec<TaskId>> {
        let batch = TaskBatch::new(tasks.to_vec())?;
        batch.tasks().iter().try_for_each(ensure_new_task)?;
        let opened = self.now();
        let mut state = self.write_state()?;
        let ids = state.reserve_task_ids(batch.len()).map_err(store_error)?;
        for (id, task) in ids.iter().zip(batch) {
            state.insert_new(*id, task, opened);
        }
        debug!(batch_size = ids.len(), "created task batch");
        Ok(ids)
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskRepositoryResult<()> {
        if update.is_empty() {
            return Ok(());
        }
        if let Some(title) = &update.title {
            ensure_text(title)?;
        }
        if let Some(content) = &update.content {
            ensure_text(content)?;
        }

        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&id) {
            return Ok(());
        }
        if let Some(assigned_id) = update.assigned_id {
            state.ensure_user(assigned_id).map_err(store_error)?;
        }
        if let Some(task) = state.tasks.get_mut(&id) {
            task.apply(update);
        }
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        state.links.retain(|(task_id, _)| *task_id != id);
        let removed = state.tasks.remove(&id).is_some();
        debug!(task_id = %id, removed, "deleted task");
        Ok(())
    }
}
