//! Migration unit types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MigrateResult;

/// Direction of migration traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Apply changes (forward).
    Up,
    /// Revert changes (backward).
    Down,
}

impl Direction {
    /// Directory name holding this direction's artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a migration unit, inferred from its artifact extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Raw SQL text, executed as a single batch.
    Sql,
    /// A registered [`crate::script::ScriptUnit`], invoked through the
    /// script registry.
    Script,
}

impl UnitKind {
    /// Recognize a unit kind from an artifact extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "sql" => Some(Self::Sql),
            "script" => Some(Self::Script),
            _ => None,
        }
    }

    /// The artifact extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One versioned migration unit discovered on disk.
///
/// Units are immutable once applied anywhere; the engine only ever reads
/// their content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationUnit {
    /// Traversal direction this unit belongs to.
    pub direction: Direction,
    /// Non-negative version, unique within a direction.
    pub version: u64,
    /// Unit kind.
    pub kind: UnitKind,
    /// Path to the artifact on disk.
    pub path: PathBuf,
}

impl MigrationUnit {
    /// Create a unit for an artifact path.
    pub fn new(direction: Direction, version: u64, kind: UnitKind, path: impl Into<PathBuf>) -> Self {
        Self {
            direction,
            version,
            kind,
            path: path.into(),
        }
    }

    /// Human-readable artifact name, e.g. `up/3.sql`.
    pub fn artifact_name(&self) -> String {
        format!("{}/{}.{}", self.direction, self.version, self.kind)
    }

    /// Read the unit's SQL text from disk.
    pub async fn read_sql(&self) -> MigrateResult<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    /// Path to the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension() {
        assert_eq!(UnitKind::from_extension("sql"), Some(UnitKind::Sql));
        assert_eq!(UnitKind::from_extension("script"), Some(UnitKind::Script));
        assert_eq!(UnitKind::from_extension("txt"), None);
        assert_eq!(UnitKind::from_extension(""), None);
    }

    #[test]
    fn artifact_name_format() {
        let unit = MigrationUnit::new(Direction::Down, 7, UnitKind::Sql, "migrations/down/7.sql");
        assert_eq!(unit.artifact_name(), "down/7.sql");
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
    }
}
