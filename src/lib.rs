//! Declarative CRUD building and async execution over `SQLite`.
//!
//! Callers describe operations as data (a table name, ordered column/value
//! maps, ordered condition maps); the crate compiles them into parameterized
//! SQL, binds every value positionally with an inferred wire-type tag, and
//! executes them on a single explicitly-owned connection.
//!
//! ```rust
//! use sql_dal::prelude::*;
//!
//! async fn demo() -> Result<(), DbError> {
//!     let mut db = DbClient::open(DbConfig::in_memory()).await?;
//!     db.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)")
//!         .await?;
//!
//!     let row = ValueMap::new()
//!         .set("name", SqlValue::Text("alice".into()))
//!         .set("age", SqlValue::Int(33));
//!     let id = db.insert("users", &row).await?;
//!
//!     let found = db
//!         .select(
//!             "users",
//!             &[],
//!             &ConditionSet::new().with("id", Condition::Equals(SqlValue::Int(id))),
//!             &SelectOptions::default(),
//!         )
//!         .await?;
//!     assert_eq!(found.rows.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! Every fallible operation returns `Result<_, DbError>`; there are no
//! sentinel return values. Connection and execution failures are also
//! recorded in the client's error log before they propagate.

mod builder;
mod client;
mod conditions;
mod config;
mod error;
mod executor;
mod logging;
mod results;
mod sqlite;
mod types;

pub mod prelude;

pub use builder::{
    SelectOptions, Statement, build_delete, build_insert, build_select, build_update, build_upsert,
    compile_conditions, quote_identifier,
};
pub use client::DbClient;
pub use conditions::{CompareOp, Condition, ConditionSet, ValueMap};
pub use config::DbConfig;
pub use error::DbError;
pub use executor::DatabaseExecutor;
pub use logging::ErrorLog;
pub use results::{DbRow, ResultSet};
pub use sqlite::{SqliteConnection, convert_params};
pub use types::{BindType, SqlValue};
