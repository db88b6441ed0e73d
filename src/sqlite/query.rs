use std::sync::Arc;

use rusqlite::ToSql;
use rusqlite::types::Value;

use crate::error::DbError;
use crate::results::ResultSet;
use crate::types::SqlValue;

/// Extract one column of a driver row as a [`SqlValue`].
fn extract_value(row: &rusqlite::Row<'_>, idx: usize) -> Result<SqlValue, DbError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Int(i),
        Value::Real(f) => SqlValue::Float(f),
        Value::Text(s) => SqlValue::Text(s),
        Value::Blob(b) => SqlValue::Blob(b),
    })
}

/// Run a prepared SELECT and materialize every row into a [`ResultSet`].
pub(crate) fn build_result_set(
    stmt: &mut rusqlite::Statement<'_>,
    params: &[Value],
) -> Result<ResultSet, DbError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query(&param_refs[..])?;
    while let Some(row) = rows_iter.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(extract_value(row, i)?);
        }
        result_set.add_row_values(values);
    }

    Ok(result_set)
}
