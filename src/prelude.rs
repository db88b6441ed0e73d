//! Convenient imports for common functionality.
//!
//! ```rust
//! use sql_dal::prelude::*;
//! ```

pub use crate::builder::{
    SelectOptions, Statement, build_delete, build_insert, build_select, build_update, build_upsert,
    compile_conditions, quote_identifier,
};
pub use crate::client::DbClient;
pub use crate::conditions::{CompareOp, Condition, ConditionSet, ValueMap};
pub use crate::config::DbConfig;
pub use crate::error::DbError;
pub use crate::executor::DatabaseExecutor;
pub use crate::results::{DbRow, ResultSet};
pub use crate::sqlite::SqliteConnection;
pub use crate::types::{BindType, SqlValue};
