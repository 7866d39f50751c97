//! Error types for sqlchain

use thiserror::Error;

/// Message carried by every wrapped execution failure.
pub const QUERY_EXECUTION_FAILED: &str = "Query execution failed";

/// The main error type for sqlchain operations
#[derive(Error, Debug)]
pub enum Error {
    /// Raw engine error (connection, malformed SQL, constraint violation)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A statement failed to execute. The display text is only `message`;
    /// the engine error that caused it, if any, is reachable through
    /// `std::error::Error::source`.
    #[error("{message}")]
    QueryExecution {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid executor or builder configuration
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Convenience Result type for sqlchain operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a query execution error with its own message and no cause
    pub fn query_execution(message: impl Into<String>) -> Self {
        Self::QueryExecution {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Fold an executor failure into the generic execution error.
    ///
    /// A failure that already is `QueryExecution` comes back unchanged so its
    /// message survives; anything else gets the fixed message and is kept as
    /// the source.
    pub fn into_query_execution(self) -> Self {
        match self {
            err @ Self::QueryExecution { .. } => err,
            other => Self::QueryExecution {
                message: QUERY_EXECUTION_FAILED.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }

    pub fn is_query_execution(&self) -> bool {
        matches!(self, Self::QueryExecution { .. })
    }

    /// The engine error a wrapped `QueryExecution` was built from
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Self::QueryExecution {
                source: Some(cause),
                ..
            } => Some(cause.as_ref()),
            _ => None,
        }
    }
}
