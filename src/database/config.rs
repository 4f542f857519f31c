//! Connection settings for the task store.

use super::{DatabaseError, DatabaseResult};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Environment variable holding the database password.
pub const PASSWORD_ENV_VAR: &str = "POSTGRES_PASSWORD";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_USER: &str = "postgres";
const DEFAULT_DATABASE: &str = "tasks";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Flat connection settings assembled into a `postgres://` URL.
///
/// Every field except the password is expected to come from a config file or
/// struct literal; the password is conventionally read from
/// [`PASSWORD_ENV_VAR`] via [`DatabaseConfig::with_password_from_env`].
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Role used to authenticate.
    pub user: String,
    /// Password for [`Self::user`]; empty when the server does not need one.
    pub password: String,
    /// Database holding the task schema.
    pub database: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before giving up.
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_owned(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl DatabaseConfig {
    /// Creates settings for the given server and database with an empty
    /// password and default pool sizing.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Sets the password explicitly.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Reads the password from [`PASSWORD_ENV_VAR`].
    ///
    /// An unset or non-UTF-8 variable leaves the password empty.
    #[must_use]
    pub fn with_password_from_env(mut self) -> Self {
        self.password = std::env::var(PASSWORD_ENV_VAR).unwrap_or_default();
        self
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Assembles the connection URL, percent-encoding the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidConfig`] when the host cannot form a
    /// valid URL or the credentials cannot be attached to it.
    pub fn connection_url(&self) -> DatabaseResult<String> {
        let base = format!("postgres://{}:{}/", self.host, self.port);
        let mut url = Url::parse(&base)
            .map_err(|err| DatabaseError::InvalidConfig(format!("host '{}': {err}", self.host)))?;
        url.set_username(&self.user)
            .map_err(|()| DatabaseError::InvalidConfig(format!("user '{}'", self.user)))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| DatabaseError::InvalidConfig("password".to_owned()))?;
        }
        url.path_segments_mut()
            .map_err(|()| DatabaseError::InvalidConfig(format!("host '{}'", self.host)))?
            .clear()
            .push(&self.database);
        Ok(url.into())
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &password)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}
