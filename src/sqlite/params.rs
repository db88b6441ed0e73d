use rusqlite::types::Value;

use crate::error::DbError;
use crate::types::{BindType, SqlValue};

/// Convert a single value to its driver representation under the given
/// wire-type tag.
fn bind_value(value: &SqlValue, tag: BindType) -> Value {
    match (tag, value) {
        (BindType::Integer, SqlValue::Int(i)) => Value::Integer(*i),
        // Booleans ride the integer tag, coerced to 0/1 here.
        (BindType::Integer, SqlValue::Bool(b)) => Value::Integer(i64::from(*b)),
        (BindType::Float, SqlValue::Float(f)) => Value::Real(*f),
        // NULL rides the text tag; the driver casts it.
        (BindType::Text, SqlValue::Null) => Value::Null,
        (BindType::Text, SqlValue::Text(s)) => Value::Text(s.clone()),
        (BindType::Text, SqlValue::Timestamp(dt)) => {
            Value::Text(dt.format("%F %T%.f").to_string())
        }
        (BindType::Text, SqlValue::Json(json)) => Value::Text(json.to_string()),
        (BindType::Binary, SqlValue::Blob(bytes)) => Value::Blob(bytes.clone()),
        // A tag that disagrees with its value falls back to the inferred tag.
        (_, value) => bind_value(value, BindType::infer(value)),
    }
}

/// Convert compiler output into positional driver parameters.
///
/// # Errors
///
/// Returns `DbError::ParameterError` when the parameter and type-tag lists
/// disagree in length.
pub fn convert_params(params: &[SqlValue], types: &[BindType]) -> Result<Vec<Value>, DbError> {
    if params.len() != types.len() {
        return Err(DbError::ParameterError(format!(
            "{} parameters with {} type tags",
            params.len(),
            types.len()
        )));
    }
    Ok(params
        .iter()
        .zip(types)
        .map(|(value, tag)| bind_value(value, *tag))
        .collect())
}
