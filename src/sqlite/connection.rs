use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::spawn_blocking;

use crate::config::DbConfig;
use crate::error::DbError;
use crate::executor::DatabaseExecutor;
use crate::results::ResultSet;
use crate::types::{BindType, SqlValue};

use super::params::convert_params;
use super::query::build_result_set;

type SharedConnection = Arc<Mutex<rusqlite::Connection>>;

/// A single `SQLite` connection with local transaction state.
///
/// The handle is explicit and caller-owned: [`SqliteConnection::open`]
/// establishes it and [`SqliteConnection::close`] tears it down. Blocking
/// driver calls run on the blocking thread pool while an async mutex
/// serializes access to the connection. Statements issued while a
/// transaction is active execute inside it.
pub struct SqliteConnection {
    shared: SharedConnection,
    in_transaction: bool,
}

impl SqliteConnection {
    /// Open a connection using `config.database` as the filesystem path
    /// (`:memory:` for a transient database) and apply the startup pragmas.
    /// WAL keeps readers unblocked; `busy_timeout` bounds lock waits.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionError` if the database cannot be opened
    /// or the pragmas fail to apply.
    pub async fn open(config: &DbConfig) -> Result<Self, DbError> {
        let path = config.database.clone();
        let conn = spawn_blocking(move || {
            let conn = rusqlite::Connection::open(&path)
                .map_err(|e| DbError::ConnectionError(format!("failed to open {path}: {e}")))?;
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;")
                .map_err(|e| {
                    DbError::ConnectionError(format!("failed to apply startup pragmas: {e}"))
                })?;
            Ok::<_, DbError>(conn)
        })
        .await
        .map_err(join_error)??;

        Ok(Self {
            shared: Arc::new(Mutex::new(conn)),
            in_transaction: false,
        })
    }

    /// Close the connection, releasing its file handles.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionError` if the handle is still shared, or
    /// the driver's error if closing fails.
    pub async fn close(self) -> Result<(), DbError> {
        let shared = self.shared;
        spawn_blocking(move || {
            let conn = Arc::try_unwrap(shared)
                .map_err(|_| {
                    DbError::ConnectionError("connection handle still in use elsewhere".into())
                })?
                .into_inner();
            conn.close().map_err(|(_, e)| DbError::from(e))
        })
        .await
        .map_err(join_error)?
    }

    /// Whether a transaction is currently active on this connection.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    /// Begin a transaction. Only one may be active at a time; nesting is
    /// not supported.
    ///
    /// # Errors
    ///
    /// Returns `DbError::TransactionError` if a transaction is already
    /// active, or the driver's error if BEGIN fails.
    pub async fn begin(&mut self) -> Result<(), DbError> {
        if self.in_transaction {
            return Err(DbError::TransactionError(
                "transaction already active".into(),
            ));
        }
        run_blocking(self.handle(), |conn| {
            conn.execute_batch("BEGIN").map_err(DbError::from)
        })
        .await?;
        self.in_transaction = true;
        Ok(())
    }

    /// Commit the active transaction. The connection stays in transactional
    /// mode if the driver reports a commit failure.
    ///
    /// # Errors
    ///
    /// Returns `DbError::TransactionError` if no transaction is active, or
    /// the driver's error if COMMIT fails.
    pub async fn commit(&mut self) -> Result<(), DbError> {
        if !self.in_transaction {
            return Err(DbError::TransactionError(
                "no active transaction to commit".into(),
            ));
        }
        run_blocking(self.handle(), |conn| {
            conn.execute_batch("COMMIT").map_err(DbError::from)
        })
        .await?;
        self.in_transaction = false;
        Ok(())
    }

    /// Roll back the active transaction. The local flag resets even when
    /// the driver reports a rollback error.
    ///
    /// # Errors
    ///
    /// Returns `DbError::TransactionError` if no transaction is active, or
    /// the driver's error if ROLLBACK fails.
    pub async fn rollback(&mut self) -> Result<(), DbError> {
        if !self.in_transaction {
            return Err(DbError::TransactionError(
                "no active transaction to roll back".into(),
            ));
        }
        self.in_transaction = false;
        run_blocking(self.handle(), |conn| {
            conn.execute_batch("ROLLBACK").map_err(DbError::from)
        })
        .await
    }

    fn handle(&self) -> SharedConnection {
        Arc::clone(&self.shared)
    }
}

#[async_trait]
impl DatabaseExecutor for SqliteConnection {
    async fn execute_batch(&mut self, sql: &str) -> Result<(), DbError> {
        let sql_owned = sql.to_owned();
        run_blocking(self.handle(), move |conn| {
            conn.execute_batch(&sql_owned).map_err(DbError::from)
        })
        .await
    }

    async fn execute_select(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        types: &[BindType],
    ) -> Result<ResultSet, DbError> {
        let converted = convert_params(params, types)?;
        let sql_owned = sql.to_owned();
        run_blocking(self.handle(), move |conn| {
            let mut stmt = conn.prepare(&sql_owned)?;
            build_result_set(&mut stmt, &converted)
        })
        .await
    }

    async fn execute_dml(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        types: &[BindType],
    ) -> Result<usize, DbError> {
        let converted = convert_params(params, types)?;
        let sql_owned = sql.to_owned();
        run_blocking(self.handle(), move |conn| {
            let mut stmt = conn.prepare(&sql_owned)?;
            let refs: Vec<&dyn rusqlite::ToSql> =
                converted.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
            let affected = stmt.execute(&refs[..])?;
            Ok(affected)
        })
        .await
    }

    async fn execute_insert(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        types: &[BindType],
    ) -> Result<i64, DbError> {
        let converted = convert_params(params, types)?;
        let sql_owned = sql.to_owned();
        run_blocking(self.handle(), move |conn| {
            let mut stmt = conn.prepare(&sql_owned)?;
            let refs: Vec<&dyn rusqlite::ToSql> =
                converted.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
            stmt.execute(&refs[..])?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("in_transaction", &self.in_transaction)
            .finish()
    }
}

async fn run_blocking<F, R>(shared: SharedConnection, func: F) -> Result<R, DbError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, DbError> + Send + 'static,
    R: Send + 'static,
{
    spawn_blocking(move || {
        let mut guard = shared.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(join_error)?
}

fn join_error(err: tokio::task::JoinError) -> DbError {
    DbError::ExecutionError(format!("blocking task join error: {err}"))
}
