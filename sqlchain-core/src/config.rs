//! Executor and builder configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// SQLite `journal_mode` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    #[default]
    Wal,
    Off,
}

impl JournalMode {
    /// Keyword SQLite uses for the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Wal => "WAL",
            JournalMode::Off => "OFF",
        }
    }
}

impl std::fmt::Display for JournalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a builder reports executor failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Fold failures into `Error::QueryExecution` with a fixed message,
    /// keeping the engine error as its source
    #[default]
    Wrap,
    /// Return the executor's error untouched
    Propagate,
}

impl ErrorMode {
    pub fn apply(self, err: Error) -> Error {
        match self {
            ErrorMode::Wrap => err.into_query_execution(),
            ErrorMode::Propagate => err,
        }
    }
}

/// Connection settings for an executor
///
/// # Examples
/// ```
/// use sqlchain_core::{ExecutorConfig, JournalMode};
///
/// let config = ExecutorConfig::new("sqlite:app.db")
///     .with_journal_mode(JournalMode::Wal)
///     .with_default_table(
///         "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY, name TEXT)",
///     );
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Database URL, e.g. `sqlite::memory:` or `sqlite:data.db`
    pub url: String,
    pub journal_mode: JournalMode,
    pub max_connections: u32,
    /// DDL run once at connect time. Should be idempotent
    /// (`CREATE TABLE IF NOT EXISTS ...`).
    pub default_table: Option<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            journal_mode: JournalMode::default(),
            max_connections: 1,
            default_table: None,
        }
    }
}

impl ExecutorConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = mode;
        self
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_default_table(mut self, ddl: impl Into<String>) -> Self {
        self.default_table = Some(ddl.into());
        self
    }

    /// True for URLs whose database lives only inside one connection
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::config("database url is empty"));
        }
        if self.max_connections == 0 {
            return Err(Error::config("max_connections must be at least 1"));
        }
        Ok(())
    }
}

/// Per-builder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub error_mode: ErrorMode,
}

impl QueryConfig {
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExecutorConfig::default();
        assert_eq!(config.url, "sqlite::memory:");
        assert_eq!(config.journal_mode, JournalMode::Wal);
        assert_eq!(config.max_connections, 1);
        assert!(config.default_table.is_none());
        assert!(config.is_in_memory());
        assert_eq!(QueryConfig::default().error_mode, ErrorMode::Wrap);
    }

    #[test]
    fn test_journal_mode_keyword() {
        assert_eq!(JournalMode::Wal.as_str(), "WAL");
        assert_eq!(JournalMode::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_validate() {
        assert!(ExecutorConfig::new("sqlite:app.db").validate().is_ok());
        assert!(matches!(
            ExecutorConfig::new("  ").validate(),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            ExecutorConfig::default().with_max_connections(0).validate(),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ExecutorConfig = serde_json::from_value(serde_json::json!({
            "url": "sqlite:data.db",
            "journal_mode": "DELETE"
        }))
        .unwrap();
        assert_eq!(config.url, "sqlite:data.db");
        assert_eq!(config.journal_mode, JournalMode::Delete);
        assert_eq!(config.max_connections, 1);
        assert!(!config.is_in_memory());

        let query: QueryConfig =
            serde_json::from_value(serde_json::json!({"error_mode": "propagate"})).unwrap();
        assert_eq!(query.error_mode, ErrorMode::Propagate);
    }

    #[test]
    fn test_error_mode_apply() {
        let wrapped = ErrorMode::Wrap.apply(Error::config("x"));
        assert!(wrapped.is_query_execution());

        let raw = ErrorMode::Propagate.apply(Error::config("x"));
        assert!(matches!(raw, Error::Config { .. }));
    }
}
