use std::fmt;

use crate::error::DbError;
use crate::types::SqlValue;

/// Comparison operators accepted in a [`Condition::Compare`].
///
/// Operators are spliced into SQL text (SQL does not allow binding an
/// operator), so the set is closed; dynamically supplied symbols must go
/// through [`CompareOp::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
}

impl CompareOp {
    /// Parse an operator symbol against the allow-list.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CompileError` for any symbol outside
    /// `{=, !=, <, <=, >, >=, LIKE}`.
    pub fn parse(symbol: &str) -> Result<Self, DbError> {
        match symbol.trim() {
            "=" => Ok(Self::Eq),
            "!=" => Ok(Self::NotEq),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::LtEq),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::GtEq),
            s if s.eq_ignore_ascii_case("LIKE") => Ok(Self::Like),
            other => Err(DbError::CompileError(format!(
                "comparison operator not allowed: {other:?}"
            ))),
        }
    }

    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A single WHERE constraint on one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `` `col` = ? ``
    Equals(SqlValue),
    /// `` `col` IN (?, ...) ``; the list must be non-empty.
    In(Vec<SqlValue>),
    /// `` `col` BETWEEN ? AND ? ``; low then high, exactly as given.
    Between(SqlValue, SqlValue),
    /// `` `col` <op> ? `` with an allow-listed operator.
    Compare(CompareOp, SqlValue),
}

/// Ordered column → condition map, compiled into a WHERE clause.
///
/// Insertion order is significant: it fixes the position of every `?`
/// placeholder and its parameter in the compiled statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    entries: Vec<(String, Condition)>,
}

impl ConditionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition, builder style.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, condition: Condition) -> Self {
        self.push(column, condition);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, condition: Condition) {
        self.entries.push((column.into(), condition));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Condition)> {
        self.entries.iter()
    }
}

/// Ordered column → value map used as an INSERT/UPDATE payload.
///
/// Column order follows insertion order and determines placeholder order in
/// the built statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    entries: Vec<(String, SqlValue)>,
}

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column value, builder style.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: SqlValue) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.entries.push((column.into(), value));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(column, _)| column.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, SqlValue)> {
        self.entries.iter()
    }
}
