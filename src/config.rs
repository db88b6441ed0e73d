use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// Connection configuration consumed by `DbClient::open`.
///
/// The embedded `SQLite` driver reads `database` as the filesystem path
/// (`:memory:` for a transient database) and ignores the network-oriented
/// keys, which keep their conventional defaults for server-backed
/// deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// Server host. Default: `localhost`.
    pub host: String,
    /// Login user. Default: `root`.
    pub username: String,
    /// Login password. Default: empty.
    pub password: String,
    /// Database name, or the filesystem path for the embedded driver.
    /// Default: empty (rejected at `open`).
    pub database: String,
    /// Connection character set. Default: `utf8mb4`.
    pub charset: String,
    /// Server port. Default: `3306`.
    pub port: u16,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            username: "root".into(),
            password: String::new(),
            database: String::new(),
            charset: "utf8mb4".into(),
            port: 3306,
        }
    }
}

impl DbConfig {
    /// Configuration pointing at the given database, other keys defaulted.
    #[must_use]
    pub fn for_database(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// In-memory database configuration, handy in tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::for_database(":memory:")
    }

    pub(crate) fn validate(&self) -> Result<(), DbError> {
        if self.database.is_empty() {
            return Err(DbError::ConfigError("database name is required".into()));
        }
        Ok(())
    }
}
