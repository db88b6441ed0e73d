use std::fmt::Write;

use crate::conditions::{Condition, ConditionSet};
use crate::error::DbError;

use super::{Statement, quote_identifier};

/// Compile a condition set into a WHERE fragment.
///
/// Entries compile in insertion order and join with `AND`; every emitted
/// `?` placeholder corresponds 1:1, left to right, with the produced
/// parameters and type tags. A BETWEEN pair binds low then high exactly as
/// given; no swap is attempted, since BETWEEN semantics belong to SQL.
///
/// # Errors
///
/// Returns `DbError::CompileError` for an empty membership list (never
/// emits `IN ()`) or an invalid column identifier.
pub fn compile_conditions(conditions: &ConditionSet) -> Result<Statement, DbError> {
    let mut stmt = Statement::new(String::new());
    for (i, (column, condition)) in conditions.iter().enumerate() {
        if i > 0 {
            stmt.sql.push_str(" AND ");
        }
        let column = quote_identifier(column)?;
        match condition {
            Condition::Equals(value) => {
                let _ = write!(stmt.sql, "{column} = ?");
                stmt.push_param(value.clone());
            }
            Condition::In(values) => {
                if values.is_empty() {
                    return Err(DbError::CompileError(format!(
                        "IN condition on {column} has no values"
                    )));
                }
                let placeholders = vec!["?"; values.len()].join(", ");
                let _ = write!(stmt.sql, "{column} IN ({placeholders})");
                for value in values {
                    stmt.push_param(value.clone());
                }
            }
            Condition::Between(low, high) => {
                let _ = write!(stmt.sql, "{column} BETWEEN ? AND ?");
                stmt.push_param(low.clone());
                stmt.push_param(high.clone());
            }
            Condition::Compare(op, value) => {
                let _ = write!(stmt.sql, "{column} {op} ?");
                stmt.push_param(value.clone());
            }
        }
    }
    Ok(stmt)
}
