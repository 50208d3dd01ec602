//! Migration artifact discovery on the filesystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::MigrateResult;
use crate::unit::{Direction, MigrationUnit, UnitKind};

/// Reads migration artifacts from a directory tree of the form:
///
/// ```text
/// migrations/
/// ├── up/
/// │   ├── 0.sql        # initial schema creation only
/// │   ├── 1.sql
/// │   └── 2.script     # marker for a registered script unit
/// └── down/
///     ├── 1.sql
///     └── 2.script
/// ```
///
/// An artifact's version is the part of its file name before the first `.`;
/// the remainder must be a recognized unit-type extension (`sql` or
/// `script`) or the file is ignored. Versions need not be contiguous.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the migrations directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The migrations root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The artifact directory for one direction.
    pub fn direction_dir(&self, direction: Direction) -> PathBuf {
        self.root.join(direction.as_str())
    }

    /// Create the `up/` and `down/` directories if absent.
    pub async fn ensure_layout(&self) -> MigrateResult<()> {
        for direction in [Direction::Up, Direction::Down] {
            tokio::fs::create_dir_all(self.direction_dir(direction)).await?;
        }
        Ok(())
    }

    /// Enumerate the available units for a direction, keyed by version.
    ///
    /// When both a SQL and a script artifact exist for the same version the
    /// SQL artifact wins; the duplicate is a configuration mistake this
    /// store tolerates rather than detects.
    pub async fn discover(&self, direction: Direction) -> MigrateResult<BTreeMap<u64, MigrationUnit>> {
        let mut units = BTreeMap::new();
        let dir = self.direction_dir(direction);

        if !dir.exists() {
            return Ok(units);
        }

        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some((version, kind)) = parse_artifact_name(name) else {
                trace!(artifact = name, "ignoring non-migration file");
                continue;
            };

            let unit = MigrationUnit::new(direction, version, kind, &path);
            match units.get(&version) {
                Some(existing) if existing.kind == UnitKind::Sql => {
                    trace!(version, "duplicate artifact shadowed by SQL unit");
                }
                Some(_) if kind == UnitKind::Sql => {
                    units.insert(version, unit);
                }
                Some(_) => {
                    trace!(version, "duplicate script artifact ignored");
                }
                None => {
                    units.insert(version, unit);
                }
            }
        }

        Ok(units)
    }

    /// The next unused version in the `up` direction, for scaffolding.
    pub async fn next_version(&self) -> MigrateResult<u64> {
        let units = self.discover(Direction::Up).await?;
        Ok(units.keys().next_back().map_or(1, |max| max + 1))
    }
}

/// Parse `<version>.<ext>` into a version and unit kind.
///
/// The version is everything before the first `.`, so `3.backup.sql` has
/// the unrecognized extension `backup.sql` and is skipped.
fn parse_artifact_name(name: &str) -> Option<(u64, UnitKind)> {
    let (prefix, ext) = name.split_once('.')?;
    let version = prefix.parse::<u64>().ok()?;
    let kind = UnitKind::from_extension(ext)?;
    Some((version, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    async fn store_with(files: &[(&str, &str)]) -> (TempDir, FileStore) {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store.ensure_layout().await.unwrap();
        for (rel, content) in files {
            tokio::fs::write(tmp.path().join(rel), content).await.unwrap();
        }
        (tmp, store)
    }

    #[test]
    fn parse_recognized_names() {
        assert_eq!(parse_artifact_name("0.sql"), Some((0, UnitKind::Sql)));
        assert_eq!(parse_artifact_name("12.script"), Some((12, UnitKind::Script)));
        assert_eq!(parse_artifact_name("3.backup.sql"), None);
        assert_eq!(parse_artifact_name("abc.sql"), None);
        assert_eq!(parse_artifact_name("README"), None);
        assert_eq!(parse_artifact_name(".gitkeep"), None);
    }

    #[tokio::test]
    async fn discover_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("nowhere"));
        let units = store.discover(Direction::Up).await.unwrap();
        assert!(units.is_empty());
    }

    #[tokio::test]
    async fn discover_orders_by_version_and_skips_noise() {
        let (_tmp, store) = store_with(&[
            ("up/5.sql", "SELECT 5;"),
            ("up/1.sql", "SELECT 1;"),
            ("up/3.script", ""),
            ("up/notes.txt", "not a migration"),
            ("down/1.sql", "SELECT -1;"),
        ])
        .await;

        let up = store.discover(Direction::Up).await.unwrap();
        assert_eq!(up.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(up[&3].kind, UnitKind::Script);

        let down = store.discover(Direction::Down).await.unwrap();
        assert_eq!(down.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[tokio::test]
    async fn sql_wins_over_script_for_same_version() {
        let (_tmp, store) = store_with(&[("up/2.sql", "SELECT 2;"), ("up/2.script", "")]).await;

        let up = store.discover(Direction::Up).await.unwrap();
        assert_eq!(up.len(), 1);
        assert_eq!(up[&2].kind, UnitKind::Sql);
    }

    #[tokio::test]
    async fn next_version_counts_from_up_side() {
        let (_tmp, store) = store_with(&[("up/0.sql", ""), ("up/4.sql", ""), ("down/9.sql", "")]).await;
        assert_eq!(store.next_version().await.unwrap(), 5);

        let empty = TempDir::new().unwrap();
        let store = FileStore::new(empty.path());
        assert_eq!(store.next_version().await.unwrap(), 1);
    }
}
