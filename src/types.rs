use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values that can be stored in a database row or bound as statement
/// parameters.
///
/// One enum covers both directions so builder code and result handling do
/// not need to branch on driver types:
/// ```rust
/// use sql_dal::prelude::*;
///
/// let params = vec![
///     SqlValue::Int(1),
///     SqlValue::Text("alice".into()),
///     SqlValue::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value, bound as 0/1
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let SqlValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SqlValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Boolean view, also accepting the 0/1 integer encoding.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Bool(value) => Some(*value),
            SqlValue::Int(0) => Some(false),
            SqlValue::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Timestamp view, parsing the driver's text encodings when needed.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let SqlValue::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let SqlValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let SqlValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

/// Wire-level tag telling the driver how to encode a bound value.
///
/// Tags are derived purely from the runtime variant of a [`SqlValue`],
/// never from schema metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindType {
    Integer,
    Float,
    Text,
    Binary,
}

impl BindType {
    /// Infer the wire-type tag for a value.
    ///
    /// Booleans ride the integer tag and are coerced to 0/1 at the bind
    /// layer. NULL rides the text tag and is cast by the driver.
    #[must_use]
    pub fn infer(value: &SqlValue) -> BindType {
        match value {
            SqlValue::Int(_) | SqlValue::Bool(_) => BindType::Integer,
            SqlValue::Float(_) => BindType::Float,
            SqlValue::Null
            | SqlValue::Text(_)
            | SqlValue::Timestamp(_)
            | SqlValue::Json(_) => BindType::Text,
            SqlValue::Blob(_) => BindType::Binary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_value_gets_exactly_one_tag() {
        let cases = [
            (SqlValue::Int(7), BindType::Integer),
            (SqlValue::Bool(true), BindType::Integer),
            (SqlValue::Float(1.5), BindType::Float),
            (SqlValue::Text("x".into()), BindType::Text),
            (SqlValue::Null, BindType::Text),
            (SqlValue::Json(serde_json::json!({"k": 1})), BindType::Text),
            (SqlValue::Blob(vec![0x01]), BindType::Binary),
        ];
        for (value, expected) in cases {
            assert_eq!(BindType::infer(&value), expected);
        }
    }

    #[test]
    fn bool_view_accepts_integer_encoding() {
        assert_eq!(SqlValue::Int(1).as_bool(), Some(true));
        assert_eq!(SqlValue::Int(0).as_bool(), Some(false));
        assert_eq!(SqlValue::Int(2).as_bool(), None);
        assert_eq!(SqlValue::Bool(false).as_bool(), Some(false));
    }

    #[test]
    fn timestamp_view_parses_text() {
        let dt = SqlValue::Text("2024-03-01 12:30:00".into()).as_timestamp();
        assert_eq!(
            dt,
            NaiveDateTime::parse_from_str("2024-03-01 12:30:00", "%Y-%m-%d %H:%M:%S").ok()
        );
    }
}
