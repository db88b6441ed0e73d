//! Statement construction: CRUD SQL text plus ordered bind parameters.

mod dml;
mod select;
mod where_clause;

pub use dml::{build_delete, build_insert, build_update, build_upsert};
pub use select::{SelectOptions, build_select};
pub use where_clause::compile_conditions;

use crate::error::DbError;
use crate::types::{BindType, SqlValue};

/// A compiled statement: SQL text plus ordered parameters and their
/// wire-type tags.
///
/// Placeholders, parameters, and tags correspond 1:1, left to right.
/// Statements are built per call and handed straight to the executor; they
/// are never cached or shared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
    pub types: Vec<BindType>,
}

impl Statement {
    pub(crate) fn new(sql: String) -> Self {
        Self {
            sql,
            params: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Wrap caller-supplied SQL and parameters, inferring the type tags.
    #[must_use]
    pub fn from_parts(sql: impl Into<String>, params: &[SqlValue]) -> Self {
        let mut stmt = Statement::new(sql.into());
        for value in params {
            stmt.push_param(value.clone());
        }
        stmt
    }

    /// Append a bind parameter together with its inferred wire-type tag.
    pub(crate) fn push_param(&mut self, value: SqlValue) {
        self.types.push(BindType::infer(&value));
        self.params.push(value);
    }
}

/// Validate and backtick-quote a table or column identifier.
///
/// Identifiers cannot be bound as parameters, so they are spliced into the
/// SQL text: names are restricted to ASCII alphanumerics and underscore,
/// then quoted with any embedded backtick doubled. This is an escaping
/// discipline, not a security boundary; identifiers must still come from
/// trusted code paths.
///
/// # Errors
///
/// Returns `DbError::CompileError` for an empty name or one containing
/// characters outside `[A-Za-z0-9_]`.
pub fn quote_identifier(name: &str) -> Result<String, DbError> {
    if name.is_empty() {
        return Err(DbError::CompileError("empty identifier".into()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(DbError::CompileError(format!(
            "identifier contains unsupported characters: {name:?}"
        )));
    }
    Ok(format!("`{}`", name.replace('`', "``")))
}
