//! Task store: data access over a relational task-tracking schema.
//!
//! The schema holds tasks, the users who author and are assigned to them,
//! and labels linked to tasks many-to-many. This crate exposes the
//! operations callers need over it: filtered listings, lookup by id, author,
//! or label, atomic batch inserts, partial updates, and deletes.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: plain task, user, and label values with input validation
//! - **Ports**: the [`task::ports::TaskRepository`] trait
//! - **Adapters**: `PostgreSQL` (Diesel) and in-memory implementations
//!
//! # Modules
//!
//! - [`database`]: connection configuration and the pooled handle
//! - [`task`]: task domain, repository port, and adapters

pub mod database;
pub mod task;
