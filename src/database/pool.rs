//! Pooled `PostgreSQL` handle shared by the task adapters.

use super::{DatabaseConfig, DatabaseError, DatabaseResult};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Shared handle over the connection pool.
///
/// Clones share the same pool. [`TaskDatabase::close`] releases the pool for
/// every clone; later operations fail with [`DatabaseError::Closed`].
#[derive(Debug, Clone)]
pub struct TaskDatabase {
    pool: Arc<RwLock<Option<TaskPgPool>>>,
}

impl TaskDatabase {
    /// Builds a connection pool from `config`.
    ///
    /// Pool construction opens connections eagerly, so an unreachable server
    /// or rejected credentials surface here once the connect timeout expires.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidConfig`] when the settings cannot form
    /// a connection URL or request an empty pool, and
    /// [`DatabaseError::Connection`] when the pool cannot be established.
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        if config.max_connections == 0 {
            return Err(DatabaseError::InvalidConfig(
                "max_connections must be positive".to_owned(),
            ));
        }
        let url = config.connection_url()?;
        let max_size = config.max_connections;
        let timeout = config.connect_timeout();

        let pool = tokio::task::spawn_blocking(move || {
            Pool::builder()
                .max_size(max_size)
                .connection_timeout(timeout)
                .build(ConnectionManager::<PgConnection>::new(url))
                .map_err(DatabaseError::connection)
        })
        .await
        .map_err(DatabaseError::connection)??;

        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = max_size,
            "connected to task database"
        );
        Ok(Self::from_pool(pool))
    }

    /// Wraps an already constructed pool.
    #[must_use]
    pub fn from_pool(pool: TaskPgPool) -> Self {
        Self {
            pool: Arc::new(RwLock::new(Some(pool))),
        }
    }

    /// Verifies that the server answers queries.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Closed`] after [`Self::close`], or
    /// [`DatabaseError::Unreachable`] when no connection can be checked out
    /// or the probe query fails.
    pub async fn ping(&self) -> DatabaseResult<()> {
        let pool = self.pool()?;
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DatabaseError::unreachable)?;
            diesel::sql_query("SELECT 1")
                .execute(&mut *connection)
                .map_err(DatabaseError::unreachable)?;
            Ok(())
        })
        .await
        .map_err(DatabaseError::unreachable)?
        .inspect_err(|err| warn!(error = %err, "database ping failed"))
    }

    /// Releases every pooled connection.
    ///
    /// Calling this more than once is harmless.
    pub fn close(&self) {
        let mut slot = self.pool.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            info!("closed task database pool");
        }
    }

    /// Reports whether [`Self::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Returns a clone of the pool for a single unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Closed`] after [`Self::close`].
    pub fn pool(&self) -> DatabaseResult<TaskPgPool> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .cloned()
            .ok_or(DatabaseError::Closed)
    }
}
