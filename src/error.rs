use thiserror::Error;

/// Errors surfaced by the data-access layer.
///
/// Compile and transaction-state errors are local precondition violations;
/// connection and execution errors come from the driver and are also
/// recorded in the client's error log.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Statement compile error: {0}")]
    CompileError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Transaction state error: {0}")]
    TransactionError(String),
}
