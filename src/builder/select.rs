use std::fmt::Write;

use crate::conditions::ConditionSet;
use crate::error::DbError;

use super::{Statement, compile_conditions, quote_identifier};

/// Ordering and paging options for SELECT statements.
///
/// LIMIT and OFFSET are structural integers and are spliced into the SQL
/// text rather than bound; OFFSET only applies when LIMIT is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectOptions {
    pub order_by: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn order_by(mut self, clause: impl Into<String>) -> Self {
        self.order_by = Some(clause.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Build a SELECT statement.
///
/// `columns` entries are trusted expressions (`*`, `COUNT(*) AS cnt`,
/// plain names) spliced as given; an empty slice selects `*`. An empty
/// condition set compiles to no WHERE clause, which is permitted for
/// reads, unlike UPDATE/DELETE.
///
/// # Errors
///
/// Returns `DbError::CompileError` when the table name or a condition
/// fails to compile.
pub fn build_select(
    table: &str,
    columns: &[&str],
    conditions: &ConditionSet,
    options: &SelectOptions,
) -> Result<Statement, DbError> {
    let table = quote_identifier(table)?;
    let column_list = if columns.is_empty() {
        "*".to_string()
    } else {
        columns.join(", ")
    };

    let mut stmt = Statement::new(format!("SELECT {column_list} FROM {table}"));
    if !conditions.is_empty() {
        let where_clause = compile_conditions(conditions)?;
        stmt.sql.push_str(" WHERE ");
        stmt.sql.push_str(&where_clause.sql);
        stmt.params = where_clause.params;
        stmt.types = where_clause.types;
    }
    if let Some(order_by) = &options.order_by {
        let _ = write!(stmt.sql, " ORDER BY {order_by}");
    }
    if let Some(limit) = options.limit {
        let _ = write!(stmt.sql, " LIMIT {limit}");
        if let Some(offset) = options.offset {
            let _ = write!(stmt.sql, " OFFSET {offset}");
        }
    }
    Ok(stmt)
}
