//! Connection management for the task store.
//!
//! [`TaskDatabase`] owns the r2d2 pool used by the `PostgreSQL` task
//! adapter. It is created from a [`DatabaseConfig`], checked with
//! [`TaskDatabase::ping`], and released with [`TaskDatabase::close`].

mod config;
mod error;
mod pool;

pub use config::{DatabaseConfig, PASSWORD_ENV_VAR};
pub use error::{DatabaseError, DatabaseResult};
pub use pool::{TaskDatabase, TaskPgPool};
