use std::fmt::Write;

use crate::conditions::{ConditionSet, ValueMap};
use crate::error::DbError;

use super::{Statement, compile_conditions, quote_identifier};

/// Build an INSERT statement.
///
/// Column order follows the map's insertion order; exactly one `?`
/// placeholder is emitted per column.
///
/// # Errors
///
/// Returns `DbError::CompileError` on an empty value map or an invalid
/// identifier.
pub fn build_insert(table: &str, values: &ValueMap) -> Result<Statement, DbError> {
    if values.is_empty() {
        return Err(DbError::CompileError("no values provided for insert".into()));
    }
    let table = quote_identifier(table)?;
    let mut columns = Vec::with_capacity(values.len());
    for (column, _) in values.iter() {
        columns.push(quote_identifier(column)?);
    }
    let placeholders = vec!["?"; values.len()].join(", ");
    let mut stmt = Statement::new(format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        columns.join(", ")
    ));
    for (_, value) in values.iter() {
        stmt.push_param(value.clone());
    }
    Ok(stmt)
}

/// Build an UPDATE statement. SET parameters precede WHERE parameters,
/// matching the emitted placeholder order.
///
/// # Errors
///
/// Returns `DbError::CompileError` on an empty value map, or on an empty
/// condition set, since an unconditioned UPDATE would rewrite every row.
pub fn build_update(
    table: &str,
    values: &ValueMap,
    conditions: &ConditionSet,
) -> Result<Statement, DbError> {
    if values.is_empty() {
        return Err(DbError::CompileError("no values provided for update".into()));
    }
    if conditions.is_empty() {
        return Err(DbError::CompileError(
            "no conditions provided for update; refusing to update every row".into(),
        ));
    }
    let table = quote_identifier(table)?;
    let mut stmt = Statement::new(format!("UPDATE {table} SET "));
    for (i, (column, value)) in values.iter().enumerate() {
        if i > 0 {
            stmt.sql.push_str(", ");
        }
        let column = quote_identifier(column)?;
        let _ = write!(stmt.sql, "{column} = ?");
        stmt.push_param(value.clone());
    }
    let where_clause = compile_conditions(conditions)?;
    stmt.sql.push_str(" WHERE ");
    stmt.sql.push_str(&where_clause.sql);
    stmt.params.extend(where_clause.params);
    stmt.types.extend(where_clause.types);
    Ok(stmt)
}

/// Build a DELETE statement. Same full-table guard as UPDATE.
///
/// # Errors
///
/// Returns `DbError::CompileError` on an empty condition set.
pub fn build_delete(table: &str, conditions: &ConditionSet) -> Result<Statement, DbError> {
    if conditions.is_empty() {
        return Err(DbError::CompileError(
            "no conditions provided for delete; refusing to delete every row".into(),
        ));
    }
    let table = quote_identifier(table)?;
    let where_clause = compile_conditions(conditions)?;
    let mut stmt = Statement::new(format!("DELETE FROM {table} WHERE {}", where_clause.sql));
    stmt.params = where_clause.params;
    stmt.types = where_clause.types;
    Ok(stmt)
}

/// Build an upsert: an INSERT that converts into an UPDATE when a
/// uniqueness constraint is violated on the target row.
///
/// `update_columns` limits the columns rewritten on conflict; `None` or an
/// empty slice rewrites every inserted column.
///
/// # Errors
///
/// Returns `DbError::CompileError` on an empty value map or an invalid
/// identifier.
pub fn build_upsert(
    table: &str,
    values: &ValueMap,
    update_columns: Option<&[&str]>,
) -> Result<Statement, DbError> {
    let mut stmt = build_insert(table, values)?;
    let columns: Vec<&str> = match update_columns {
        Some(columns) if !columns.is_empty() => columns.to_vec(),
        _ => values.columns().collect(),
    };
    stmt.sql.push_str(" ON CONFLICT DO UPDATE SET ");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            stmt.sql.push_str(", ");
        }
        let quoted = quote_identifier(column)?;
        let _ = write!(stmt.sql, "{quoted} = excluded.{quoted}");
    }
    Ok(stmt)
}
