//! Shared test helpers for in-memory repository integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use task_store::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PersistedTaskData, Task, TaskId, User, UserId},
};

/// Creation instant reported by [`FixedClock`].
pub const FIXED_NOW: i64 = 1_760_000_000;

/// Clock frozen at [`FIXED_NOW`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(FIXED_NOW, 0)
            .single()
            .unwrap_or_default()
    }
}

/// Store type used by these tests.
pub type SeededRepository = InMemoryTaskRepository<FixedClock>;

const USERS: [(i32, &str); 5] = [
    (1, "Ada"),
    (2, "Brian"),
    (3, "Chidi"),
    (4, "Dana"),
    (5, "Elif"),
];

// (id, opened, closed, author, assignee, title, content)
const TASKS: [(i32, i64, i64, i32, i32, &str, &str); 5] = [
    (1, 1_700_000_000, 0, 1, 2, "Crash on empty config", "Reproduce with an empty file"),
    (2, 1_700_000_100, 0, 2, 0, "Export to CSV", "Add a CSV exporter"),
    (3, 1_700_000_200, 1_700_003_600, 4, 3, "Dark mode", "Theme support"),
    (4, 1_700_000_300, 0, 4, 0, "Refresh dependencies", ""),
    (5, 1_700_000_400, 0, 5, 1, "Write onboarding guide", "First steps for new users"),
];

/// Provides a store holding five users, five tasks, and the `Bug`,
/// `Feature`, and `Docs` labels. `Docs` has no tasks.
#[fixture]
pub fn seeded() -> SeededRepository {
    let repo = InMemoryTaskRepository::with_clock(FixedClock);
    for (id, name) in USERS {
        repo.insert_user(User {
            id: UserId::new(id),
            name: name.to_owned(),
        })
        .expect("seed user");
    }
    for (id, opened, closed, author, assignee, title, content) in TASKS {
        repo.insert_task(PersistedTaskData {
            id: TaskId::new(id),
            opened,
            closed,
            author_id: UserId::new(author),
            assigned_id: UserId::new(assignee),
            title: title.to_owned(),
            content: content.to_owned(),
        })
        .expect("seed task");
    }
    let bug = repo.insert_label("Bug").expect("seed label");
    let feature = repo.insert_label("Feature").expect("seed label");
    repo.insert_label("Docs").expect("seed label");
    repo.link_label(TaskId::new(1), bug.id).expect("seed link");
    repo.link_label(TaskId::new(2), feature.id).expect("seed link");
    repo.link_label(TaskId::new(3), feature.id).expect("seed link");
    repo
}

/// Returns the raw identifiers of `tasks` in order.
pub fn ids(tasks: &[Task]) -> Vec<i32> {
    tasks.iter().map(|task| task.id().value()).collect()
}
