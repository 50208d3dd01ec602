//! Error types for the migration engine.

use thiserror::Error;

use crate::unit::Direction;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur during migration operations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database operation error.
    #[error("Database error: {0}")]
    Database(String),

    /// Requested target version has no corresponding migration unit.
    #[error("Version {version} not found among available {direction} migrations")]
    VersionNotFound {
        /// The requested version.
        version: u64,
        /// Direction that was searched.
        direction: Direction,
    },

    /// The version ledger could not be read (table missing, query failed).
    ///
    /// This error is recovered internally by [`crate::ledger::VersionLedger`]
    /// and treated as "no version recorded"; it never aborts an operation.
    #[error("Version ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// A migration unit failed to execute or commit.
    #[error("Migration unit '{unit}' failed: {message}")]
    UnitExecution {
        /// Artifact name of the failing unit, e.g. `up/3.sql`.
        unit: String,
        /// Underlying failure.
        message: String,
    },

    /// An unrecognized unit-type was requested.
    #[error("Unsupported migration type '{0}' (expected 'sql' or 'script')")]
    UnsupportedMigrationType(String),

    /// General migration error.
    #[error("Migration error: {0}")]
    Other(String),
}

impl MigrationError {
    /// Create a database error.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a version-not-found error.
    pub fn version_not_found(version: u64, direction: Direction) -> Self {
        Self::VersionNotFound { version, direction }
    }

    /// Create a ledger-unavailable error.
    pub fn ledger_unavailable(msg: impl Into<String>) -> Self {
        Self::LedgerUnavailable(msg.into())
    }

    /// Create a unit-execution error.
    pub fn unit_execution(unit: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::UnitExecution {
            unit: unit.into(),
            message: msg.into(),
        }
    }

    /// Create an unsupported-type error.
    pub fn unsupported_type(kind: impl Into<String>) -> Self {
        Self::UnsupportedMigrationType(kind.into())
    }

    /// Create an other error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Check whether this error aborts a running plan.
    ///
    /// Everything does except the ledger read fallback, which the ledger
    /// recovers before callers ever see it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::LedgerUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_not_found_display() {
        let err = MigrationError::version_not_found(4, Direction::Up);
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains("up"));
    }

    #[test]
    fn unit_execution_names_the_unit() {
        let err = MigrationError::unit_execution("down/3.sql", "constraint violation");
        assert!(err.to_string().contains("down/3.sql"));
    }

    #[test]
    fn only_ledger_read_is_recoverable() {
        assert!(!MigrationError::ledger_unavailable("no such table").is_fatal());
        assert!(MigrationError::database("connection reset").is_fatal());
        assert!(MigrationError::unsupported_type("yaml").is_fatal());
    }
}
