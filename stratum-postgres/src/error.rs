//! Error types for PostgreSQL sessions.

use std::fmt;

use stratum_migrate::MigrationError;

/// Result type for PostgreSQL session operations.
pub type PostgresResult<T> = Result<T, PostgresError>;

/// Error type for PostgreSQL session operations.
#[derive(Debug)]
pub enum PostgresError {
    /// Driver error.
    Postgres(tokio_postgres::Error),
    /// Configuration error.
    Config(String),
    /// Connection error.
    Connection(String),
}

impl PostgresError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }
}

impl fmt::Display for PostgresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres(e) => write!(f, "PostgreSQL error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
        }
    }
}

impl std::error::Error for PostgresError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Postgres(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tokio_postgres::Error> for PostgresError {
    fn from(err: tokio_postgres::Error) -> Self {
        Self::Postgres(err)
    }
}

impl From<PostgresError> for MigrationError {
    fn from(err: PostgresError) -> Self {
        MigrationError::database(err.to_string())
    }
}
