//! Per-unit transactional application.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{MigrateResult, MigrationError};
use crate::script::ScriptRegistry;
use crate::session::Session;
use crate::unit::{MigrationUnit, UnitKind};

/// Applies one migration unit at a time against a session.
///
/// Each SQL unit is executed as a single batch and committed before the
/// next unit is considered; a failed execution or commit is rolled back and
/// aborts the whole run. There is no retry.
pub struct Executor<S> {
    session: Arc<S>,
    registry: Arc<ScriptRegistry>,
}

impl<S: Session> Executor<S> {
    /// Create an executor over a session and script registry.
    pub fn new(session: Arc<S>, registry: Arc<ScriptRegistry>) -> Self {
        Self { session, registry }
    }

    /// Apply a single unit, committing on success and rolling back on
    /// failure. When `verbose` the unit's SQL text is echoed before
    /// execution.
    pub async fn apply(&self, unit: &MigrationUnit, verbose: bool) -> MigrateResult<()> {
        match unit.kind {
            UnitKind::Sql => self.apply_sql(unit, verbose).await?,
            UnitKind::Script => self.apply_script(unit).await?,
        }
        info!(unit = %unit.artifact_name(), "applied migration unit");
        Ok(())
    }

    async fn apply_sql(&self, unit: &MigrationUnit, verbose: bool) -> MigrateResult<()> {
        let mut sql = unit
            .read_sql()
            .await
            .map_err(|e| MigrationError::unit_execution(unit.artifact_name(), e.to_string()))?;

        if self.session.percent_substitution() {
            sql = double_percents(&sql);
        }

        if verbose {
            info!(unit = %unit.artifact_name(), sql = %sql, "executing migration SQL");
        } else {
            debug!(unit = %unit.artifact_name(), "executing migration SQL");
        }

        let run = async {
            self.session.execute_batch(&sql).await?;
            self.session.commit().await
        };
        if let Err(e) = run.await {
            let _ = self.session.rollback().await;
            return Err(MigrationError::unit_execution(
                unit.artifact_name(),
                e.to_string(),
            ));
        }
        Ok(())
    }

    async fn apply_script(&self, unit: &MigrationUnit) -> MigrateResult<()> {
        let Some(script) = self.registry.get(unit.direction, unit.version) else {
            return Err(MigrationError::unit_execution(
                unit.artifact_name(),
                "no script unit registered for this version",
            ));
        };

        debug!(unit = %unit.artifact_name(), "invoking script unit");
        // The script owns its own ledger mutation and commit/rollback.
        script
            .apply(&*self.session)
            .await
            .map_err(|e| MigrationError::unit_execution(unit.artifact_name(), e.to_string()))
    }
}

/// Double literal percent signs so drivers that use percent-style parameter
/// substitution pass dumped DDL through untouched.
pub fn double_percents(sql: &str) -> String {
    sql.replace('%', "%%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_percents_escapes_like_patterns() {
        assert_eq!(
            double_percents("SELECT * FROM t WHERE name LIKE 'a%'"),
            "SELECT * FROM t WHERE name LIKE 'a%%'"
        );
    }

    #[test]
    fn double_percents_leaves_plain_sql_alone() {
        let sql = "CREATE TABLE t (id INTEGER)";
        assert_eq!(double_percents(sql), sql);
    }

    #[test]
    fn double_percents_doubles_every_occurrence() {
        assert_eq!(double_percents("%%"), "%%%%");
    }
}
