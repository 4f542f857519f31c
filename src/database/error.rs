//! Error types for connection management.

use std::sync::Arc;
use thiserror::Error;

/// Result type for connection manager operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Errors returned while establishing, checking, or using the connection pool.
#[derive(Debug, Clone, Error)]
pub enum DatabaseError {
    /// The configuration cannot be turned into a connection URL.
    #[error("invalid database configuration: {0}")]
    InvalidConfig(String),

    /// The connection pool could not be established.
    #[error("unable to establish database connection: {0}")]
    Connection(Arc<dyn std::error::Error + Send + Sync>),

    /// The database did not answer a liveness check.
    #[error("database not responding: {0}")]
    Unreachable(Arc<dyn std::error::Error + Send + Sync>),

    /// The handle was closed and no longer owns a pool.
    #[error("database handle is closed")]
    Closed,
}

impl DatabaseError {
    /// Wraps a pool construction failure.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Arc::new(err))
    }

    /// Wraps a liveness check failure.
    pub fn unreachable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unreachable(Arc::new(err))
    }
}
