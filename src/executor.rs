use async_trait::async_trait;

use crate::error::DbError;
use crate::results::ResultSet;
use crate::types::{BindType, SqlValue};

/// The driver capability set the façade executes against.
///
/// Read vs. write behavior is selected by the entry point the caller used,
/// never by parsing the SQL text. Parameters bind positionally, in the
/// exact order produced by the statement builder.
#[async_trait]
pub trait DatabaseExecutor {
    /// Execute a multi-statement script. No parameters are supported.
    async fn execute_batch(&mut self, sql: &str) -> Result<(), DbError>;

    /// Execute a single SELECT and return the materialized rows.
    async fn execute_select(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        types: &[BindType],
    ) -> Result<ResultSet, DbError>;

    /// Execute a single DML statement (INSERT, UPDATE, DELETE) and return
    /// the number of rows affected.
    async fn execute_dml(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        types: &[BindType],
    ) -> Result<usize, DbError>;

    /// Execute an INSERT and return the generated row id.
    async fn execute_insert(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        types: &[BindType],
    ) -> Result<i64, DbError>;
}
