//! Diesel schema for the task store.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned identifier.
        id -> Int4,
        /// Creation time in epoch seconds.
        opened -> Int8,
        /// Completion time in epoch seconds, `0` while open.
        closed -> Int8,
        /// Author, references `users.id`.
        author_id -> Int4,
        /// Assignee, references `users.id`.
        assigned_id -> Int4,
        /// Title text.
        title -> Text,
        /// Body text.
        content -> Text,
    }
}

diesel::table! {
    /// Label names.
    labels (id) {
        /// Label identifier.
        id -> Int4,
        /// Label name.
        name -> Text,
    }
}

diesel::table! {
    /// Many-to-many links between tasks and labels.
    tasks_labels (task_id, label_id) {
        /// Linked task.
        task_id -> Int4,
        /// Linked label.
        label_id -> Int4,
    }
}

diesel::joinable!(tasks_labels -> tasks (task_id));
diesel::joinable!(tasks_labels -> labels (label_id));

diesel::allow_tables_to_appear_in_same_query!(labels, tasks, tasks_labels);
