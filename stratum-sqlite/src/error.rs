//! Error types for SQLite sessions.

use std::fmt;

use stratum_migrate::MigrationError;

/// Result type for SQLite session operations.
pub type SqliteResult<T> = Result<T, SqliteError>;

/// Error type for SQLite session operations.
#[derive(Debug)]
pub enum SqliteError {
    /// SQLite driver error.
    Sqlite(tokio_rusqlite::Error),
    /// Configuration error.
    Config(String),
    /// Connection error.
    Connection(String),
}

impl SqliteError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }
}

impl fmt::Display for SqliteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(e) => write!(f, "SQLite error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
        }
    }
}

impl std::error::Error for SqliteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sqlite(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tokio_rusqlite::Error> for SqliteError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}

impl From<rusqlite::Error> for SqliteError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(tokio_rusqlite::Error::Rusqlite(err))
    }
}

impl From<SqliteError> for MigrationError {
    fn from(err: SqliteError) -> Self {
        MigrationError::database(err.to_string())
    }
}
