//! SQLite session configuration.

use std::path::{Path, PathBuf};

use crate::error::{SqliteError, SqliteResult};

/// SQLite database configuration.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database path (or in-memory).
    pub path: DatabasePath,
    /// Enable foreign keys.
    pub foreign_keys: bool,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: Option<u32>,
}

/// Database path configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabasePath {
    /// In-memory database.
    #[default]
    Memory,
    /// File-based database.
    File(PathBuf),
}

impl DatabasePath {
    /// Get the path string for SQLite.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Memory => ":memory:",
            Self::File(path) => path.to_str().unwrap_or(":memory:"),
        }
    }

    /// Check if this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: DatabasePath::Memory,
            foreign_keys: true,
            busy_timeout_ms: Some(5000),
        }
    }
}

impl SqliteConfig {
    /// Create a new configuration for an in-memory database.
    pub fn memory() -> Self {
        Self {
            path: DatabasePath::Memory,
            ..Default::default()
        }
    }

    /// Create a new configuration for a file-based database.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            path: DatabasePath::File(path.as_ref().to_path_buf()),
            ..Default::default()
        }
    }

    /// Parse a SQLite URL into configuration.
    ///
    /// Supported formats:
    /// - `sqlite::memory:` - In-memory database
    /// - `sqlite://path/to/db.sqlite` - File-based database
    /// - `file:path/to/db.sqlite` - Alternative format
    /// - a bare filesystem path
    pub fn from_url(url: impl AsRef<str>) -> SqliteResult<Self> {
        let url_str = url.as_ref();

        if url_str == "sqlite::memory:" || url_str == ":memory:" {
            return Ok(Self::memory());
        }

        let path = if let Some(path_part) = url_str.strip_prefix("sqlite://") {
            let path_only = path_part.split('?').next().unwrap_or(path_part);
            if path_only.is_empty() {
                return Err(SqliteError::config("database path is required"));
            }
            path_only.to_string()
        } else if let Some(path_part) = url_str.strip_prefix("sqlite:") {
            let path_only = path_part.split('?').next().unwrap_or(path_part);
            if path_only == ":memory:" {
                return Ok(Self::memory());
            }
            path_only.to_string()
        } else if let Some(path_part) = url_str.strip_prefix("file:") {
            let path_only = path_part.split('?').next().unwrap_or(path_part);
            path_only.to_string()
        } else {
            url_str.to_string()
        };

        Ok(Self::file(&path))
    }

    /// SQL for the connection-time pragmas.
    pub(crate) fn pragma_sql(&self) -> String {
        let mut sql = String::new();
        if self.foreign_keys {
            sql.push_str("PRAGMA foreign_keys = ON;\n");
        }
        if let Some(timeout) = self.busy_timeout_ms {
            sql.push_str(&format!("PRAGMA busy_timeout = {timeout};\n"));
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn parses_memory_urls() {
        assert!(SqliteConfig::from_url("sqlite::memory:").unwrap().path.is_memory());
        assert!(SqliteConfig::from_url(":memory:").unwrap().path.is_memory());
    }

    #[test]
    fn parses_file_urls() {
        let config = SqliteConfig::from_url("sqlite://data/app.db").unwrap();
        assert_eq!(config.path, DatabasePath::File(PathBuf::from("data/app.db")));

        let config = SqliteConfig::from_url("file:./dev.db").unwrap();
        assert_eq!(config.path, DatabasePath::File(PathBuf::from("./dev.db")));

        let config = SqliteConfig::from_url("plain.db").unwrap();
        assert_eq!(config.path, DatabasePath::File(PathBuf::from("plain.db")));
    }

    #[test]
    fn rejects_empty_path() {
        assert!(SqliteConfig::from_url("sqlite://").is_err());
    }

    #[test]
    fn strips_query_parameters() {
        let config = SqliteConfig::from_url("sqlite://app.db?mode=rwc").unwrap();
        assert_eq!(config.path, DatabasePath::File(PathBuf::from("app.db")));
    }

    #[test]
    fn pragma_sql_reflects_settings() {
        let config = SqliteConfig::memory();
        let sql = config.pragma_sql();
        assert!(sql.contains("foreign_keys = ON"));
        assert!(sql.contains("busy_timeout = 5000"));

        let bare = SqliteConfig {
            foreign_keys: false,
            busy_timeout_ms: None,
            ..SqliteConfig::memory()
        };
        assert!(bare.pragma_sql().is_empty());
    }
}
