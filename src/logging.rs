use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

/// Append-only record of connection and execution failures.
///
/// Entries accumulate until [`ErrorLog::clear`]; nothing trims them
/// implicitly. When a log file is set, each entry is also mirrored as a
/// timestamped line. Creating the log directory is the caller's concern.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Vec<String>,
    log_file: Option<PathBuf>,
}

impl ErrorLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror future entries to the given file; `None` disables mirroring.
    pub fn set_log_file(&mut self, path: Option<PathBuf>) {
        self.log_file = path;
    }

    /// Record a failure message.
    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(target: "sql_dal", "{message}");
        if let Some(path) = &self.log_file {
            let line = format!("[{}] {message}\n", Local::now().format("%Y-%m-%d %H:%M:%S"));
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(mut file) => {
                    if let Err(e) = file.write_all(line.as_bytes()) {
                        tracing::warn!(target: "sql_dal", "error log write failed: {e}");
                    }
                }
                Err(e) => {
                    tracing::warn!(target: "sql_dal", "error log open failed: {e}");
                }
            }
        }
        self.entries.push(message);
    }

    /// All recorded messages, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Drop all recorded messages.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_clears() {
        let mut log = ErrorLog::new();
        assert!(log.last().is_none());
        log.record("first");
        log.record("second");
        assert_eq!(log.entries(), ["first", "second"]);
        assert_eq!(log.last(), Some("second"));
        log.clear();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn mirrors_to_file_with_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db_errors.log");
        let mut log = ErrorLog::new();
        log.set_log_file(Some(path.clone()));
        log.record("query failed: boom");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with('['));
        assert!(contents.contains("query failed: boom"));
    }
}
