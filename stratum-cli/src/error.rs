//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(stratum::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(stratum::config))]
    Config(String),

    /// Migration engine error
    #[error("{0}")]
    #[diagnostic(code(stratum::migration))]
    Migration(#[from] stratum_migrate::MigrationError),

    /// Database connection error
    #[error("Database error: {0}")]
    #[diagnostic(code(stratum::database))]
    Database(String),

    /// Command error
    #[error("Command error: {0}")]
    #[diagnostic(code(stratum::command))]
    Command(String),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Config(format!("Failed to serialize TOML: {}", err))
    }
}

impl From<stratum_sqlite::SqliteError> for CliError {
    fn from(err: stratum_sqlite::SqliteError) -> Self {
        CliError::Database(err.to_string())
    }
}

impl From<stratum_postgres::PostgresError> for CliError {
    fn from(err: stratum_postgres::PostgresError) -> Self {
        CliError::Database(err.to_string())
    }
}
