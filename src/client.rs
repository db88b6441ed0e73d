use std::path::PathBuf;

use crate::builder::{
    SelectOptions, Statement, build_delete, build_insert, build_select, build_update, build_upsert,
};
use crate::conditions::{ConditionSet, ValueMap};
use crate::config::DbConfig;
use crate::error::DbError;
use crate::executor::DatabaseExecutor;
use crate::logging::ErrorLog;
use crate::results::{DbRow, ResultSet};
use crate::sqlite::SqliteConnection;
use crate::types::SqlValue;

/// Data-access façade: one connection, declarative CRUD entry points, and
/// an error log for driver failures.
///
/// Every fallible operation returns `Result<_, DbError>`; there is no
/// sentinel-value error channel. Connection and execution failures are also
/// recorded in the error log before they propagate, so higher layers can
/// inspect history after the fact. Compile and transaction-state errors are
/// precondition violations and are not logged.
///
/// Access is serialized through `&mut self`; multi-worker hosts should open
/// one client per worker.
#[derive(Debug)]
pub struct DbClient {
    config: DbConfig,
    conn: SqliteConnection,
    errors: ErrorLog,
}

impl DbClient {
    /// Open a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConfigError` for an invalid configuration or
    /// `DbError::ConnectionError` if the database cannot be opened.
    pub async fn open(config: DbConfig) -> Result<Self, DbError> {
        config.validate()?;
        let conn = SqliteConnection::open(&config).await?;
        Ok(Self {
            config,
            conn,
            errors: ErrorLog::new(),
        })
    }

    /// The configuration this client was opened with.
    #[must_use]
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Close the connection, consuming the client.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if closing fails.
    pub async fn close(self) -> Result<(), DbError> {
        self.conn.close().await
    }

    /// Fetch rows matching `conditions`. An empty `columns` slice selects
    /// `*`; an empty condition set fetches the whole table.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CompileError` if the statement fails to build, or
    /// an execution error from the driver.
    pub async fn select(
        &mut self,
        table: &str,
        columns: &[&str],
        conditions: &ConditionSet,
        options: &SelectOptions,
    ) -> Result<ResultSet, DbError> {
        let stmt = build_select(table, columns, conditions, options)?;
        self.run_select(stmt).await
    }

    /// Fetch the first matching row, if any.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`DbClient::select`].
    pub async fn select_one(
        &mut self,
        table: &str,
        columns: &[&str],
        conditions: &ConditionSet,
    ) -> Result<Option<DbRow>, DbError> {
        let options = SelectOptions::new().limit(1);
        let stmt = build_select(table, columns, conditions, &options)?;
        let mut result = self.run_select(stmt).await?;
        Ok(if result.rows.is_empty() {
            None
        } else {
            Some(result.rows.remove(0))
        })
    }

    /// Insert one row and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CompileError` on an empty value map, or an
    /// execution error from the driver.
    pub async fn insert(&mut self, table: &str, values: &ValueMap) -> Result<i64, DbError> {
        let stmt = build_insert(table, values)?;
        self.run_insert(stmt).await
    }

    /// Update matching rows and return the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CompileError` on an empty value map or an empty
    /// condition set (an unconditioned UPDATE would rewrite every row), or
    /// an execution error from the driver.
    pub async fn update(
        &mut self,
        table: &str,
        values: &ValueMap,
        conditions: &ConditionSet,
    ) -> Result<usize, DbError> {
        let stmt = build_update(table, values, conditions)?;
        self.run_dml(stmt).await
    }

    /// Delete matching rows and return the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CompileError` on an empty condition set, or an
    /// execution error from the driver.
    pub async fn delete(&mut self, table: &str, conditions: &ConditionSet) -> Result<usize, DbError> {
        let stmt = build_delete(table, conditions)?;
        self.run_dml(stmt).await
    }

    /// Insert a row, converting to an update of `update_columns` (all
    /// inserted columns when `None`) if a uniqueness constraint fires.
    /// Returns the last generated row id.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CompileError` on an empty value map, or an
    /// execution error from the driver.
    pub async fn upsert(
        &mut self,
        table: &str,
        values: &ValueMap,
        update_columns: Option<&[&str]>,
    ) -> Result<i64, DbError> {
        let stmt = build_upsert(table, values, update_columns)?;
        self.run_insert(stmt).await
    }

    /// Count rows matching `conditions`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`DbClient::select`].
    pub async fn count(&mut self, table: &str, conditions: &ConditionSet) -> Result<i64, DbError> {
        let stmt = build_select(
            table,
            &["COUNT(*) AS cnt"],
            conditions,
            &SelectOptions::default(),
        )?;
        let result = self.run_select(stmt).await?;
        result
            .first()
            .and_then(|row| row.get("cnt"))
            .and_then(SqlValue::as_int)
            .copied()
            .ok_or_else(|| DbError::ExecutionError("count query returned no usable row".into()))
    }

    /// Whether any row matches `conditions`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`DbClient::count`].
    pub async fn exists(&mut self, table: &str, conditions: &ConditionSet) -> Result<bool, DbError> {
        Ok(self.count(table, conditions).await? > 0)
    }

    /// Run a caller-supplied SELECT with positional `?` parameters.
    ///
    /// # Errors
    ///
    /// Returns an execution error from the driver.
    pub async fn query_raw(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<ResultSet, DbError> {
        let stmt = Statement::from_parts(sql, params);
        self.run_select(stmt).await
    }

    /// Run a caller-supplied DML statement with positional `?` parameters
    /// and return the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns an execution error from the driver.
    pub async fn execute_raw(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, DbError> {
        let stmt = Statement::from_parts(sql, params);
        self.run_dml(stmt).await
    }

    /// Run a multi-statement script (DDL, fixtures). No parameters.
    ///
    /// # Errors
    ///
    /// Returns an execution error from the driver.
    pub async fn execute_batch(&mut self, sql: &str) -> Result<(), DbError> {
        let result = self.conn.execute_batch(sql).await;
        if let Err(e) = &result {
            self.errors.record(format!("batch failed: {e}"));
        }
        result
    }

    /// Begin a transaction. Fails while one is already active.
    ///
    /// # Errors
    ///
    /// Returns `DbError::TransactionError` when a transaction is active, or
    /// the driver's error if BEGIN fails.
    pub async fn begin_transaction(&mut self) -> Result<(), DbError> {
        let result = self.conn.begin().await;
        if let Err(e) = &result {
            self.record_driver_error("begin failed", e);
        }
        result
    }

    /// Commit the active transaction.
    ///
    /// # Errors
    ///
    /// Returns `DbError::TransactionError` when no transaction is active,
    /// or the driver's error if COMMIT fails.
    pub async fn commit(&mut self) -> Result<(), DbError> {
        let result = self.conn.commit().await;
        if let Err(e) = &result {
            self.record_driver_error("commit failed", e);
        }
        result
    }

    /// Roll back the active transaction. The transaction flag resets even
    /// when the driver reports a rollback error.
    ///
    /// # Errors
    ///
    /// Returns `DbError::TransactionError` when no transaction is active,
    /// or the driver's error if ROLLBACK fails.
    pub async fn rollback(&mut self) -> Result<(), DbError> {
        let result = self.conn.rollback().await;
        if let Err(e) = &result {
            self.record_driver_error("rollback failed", e);
        }
        result
    }

    /// Whether a transaction is currently active.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.conn.in_transaction()
    }

    /// Messages recorded for connection and execution failures, oldest
    /// first.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        self.errors.entries()
    }

    /// The most recent recorded failure.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.errors.last()
    }

    /// Clear recorded failures.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Mirror recorded failures to a timestamped, append-only log file.
    /// Directory creation is the caller's concern.
    pub fn set_error_log_file(&mut self, path: Option<PathBuf>) {
        self.errors.set_log_file(path);
    }

    async fn run_select(&mut self, stmt: Statement) -> Result<ResultSet, DbError> {
        tracing::debug!(target: "sql_dal", sql = %stmt.sql, "select");
        let result = self
            .conn
            .execute_select(&stmt.sql, &stmt.params, &stmt.types)
            .await;
        if let Err(e) = &result {
            self.errors
                .record(format!("query failed: {e} | sql: {}", stmt.sql));
        }
        result
    }

    async fn run_dml(&mut self, stmt: Statement) -> Result<usize, DbError> {
        tracing::debug!(target: "sql_dal", sql = %stmt.sql, "execute");
        let result = self
            .conn
            .execute_dml(&stmt.sql, &stmt.params, &stmt.types)
            .await;
        if let Err(e) = &result {
            self.errors
                .record(format!("execute failed: {e} | sql: {}", stmt.sql));
        }
        result
    }

    async fn run_insert(&mut self, stmt: Statement) -> Result<i64, DbError> {
        tracing::debug!(target: "sql_dal", sql = %stmt.sql, "insert");
        let result = self
            .conn
            .execute_insert(&stmt.sql, &stmt.params, &stmt.types)
            .await;
        if let Err(e) = &result {
            self.errors
                .record(format!("insert failed: {e} | sql: {}", stmt.sql));
        }
        result
    }

    /// Driver failures go to the log; state-machine violations do not.
    fn record_driver_error(&mut self, context: &str, error: &DbError) {
        if !matches!(
            error,
            DbError::TransactionError(_) | DbError::CompileError(_)
        ) {
            self.errors.record(format!("{context}: {error}"));
        }
    }
}
