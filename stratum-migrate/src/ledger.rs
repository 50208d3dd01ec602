//! The version ledger: persisted record of applied migrations.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{MigrateResult, MigrationError};
use crate::session::Session;

/// Default name of the version table.
pub const LEDGER_TABLE: &str = "db_version";

/// SQL for creating the version table if absent.
///
/// The table carries one integer column and no uniqueness constraint; the
/// current version is the maximum value among rows, not the row count.
pub fn create_table_sql(table: &str) -> String {
    format!("CREATE TABLE IF NOT EXISTS {table} (version INTEGER NOT NULL)")
}

/// Reads and writes the `db_version` table through a session.
///
/// The ledger never caches state: every read goes to the database, so each
/// planning decision sees whatever the previous unit's own SQL committed.
pub struct VersionLedger<S> {
    session: Arc<S>,
    table: String,
}

impl<S: Session> VersionLedger<S> {
    /// Create a ledger over the default table name.
    pub fn new(session: Arc<S>) -> Self {
        Self {
            session,
            table: LEDGER_TABLE.to_string(),
        }
    }

    /// Use a different version table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// The version table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the version table if it does not exist.
    pub async fn ensure_table(&self) -> MigrateResult<()> {
        self.in_own_transaction(&create_table_sql(&self.table)).await
    }

    /// The highest recorded version, or `None` when nothing is recorded.
    ///
    /// A failed read — most commonly the ledger table not existing yet on a
    /// brand-new database — is not fatal: the open transaction is rolled
    /// back, a diagnostic is logged, and the result is `None`, which
    /// downstream planning treats as version 0 ("apply everything").
    pub async fn current_version(&self) -> Option<u64> {
        let sql = format!("SELECT MAX(version) FROM {}", self.table);
        match self.session.query_scalar(&sql).await {
            Ok(value) => value.and_then(|v| u64::try_from(v).ok()),
            Err(e) => {
                let _ = self.session.rollback().await;
                let recovered = MigrationError::ledger_unavailable(e.to_string());
                warn!(error = %recovered, "treating unreadable version ledger as empty");
                None
            }
        }
    }

    /// Record a version as applied. Used by `stamp`; normal unit
    /// application inserts through the unit's own SQL instead.
    pub async fn insert_version(&self, version: u64) -> MigrateResult<()> {
        debug!(version, table = %self.table, "recording version");
        let sql = format!("INSERT INTO {} (version) VALUES ({version})", self.table);
        self.in_own_transaction(&sql).await
    }

    /// Delete the rows recording a version. Used by `remove`; normal unit
    /// reversion deletes through the unit's own SQL instead.
    pub async fn delete_version(&self, version: u64) -> MigrateResult<()> {
        debug!(version, table = %self.table, "deleting version");
        let sql = format!("DELETE FROM {} WHERE version = {version}", self.table);
        self.in_own_transaction(&sql).await
    }

    /// Delete every recorded version in `(floor, ceiling]`.
    pub async fn delete_range(&self, floor: u64, ceiling: u64) -> MigrateResult<()> {
        debug!(floor, ceiling, table = %self.table, "purging version range");
        let sql = format!(
            "DELETE FROM {} WHERE version > {floor} AND version <= {ceiling}",
            self.table
        );
        self.in_own_transaction(&sql).await
    }

    /// Run one statement in its own transaction, rolling back on failure.
    async fn in_own_transaction(&self, sql: &str) -> MigrateResult<()> {
        let run = async {
            self.session.execute_batch(sql).await?;
            self.session.commit().await
        };
        match run.await {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = self.session.rollback().await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_table_sql_names_the_table() {
        let sql = create_table_sql("db_version");
        assert!(sql.contains("db_version"));
        assert!(sql.contains("version INTEGER"));
        assert!(sql.contains("IF NOT EXISTS"));
    }
}
