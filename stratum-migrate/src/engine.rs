//! The migration engine: coordination of discovery, reconciliation,
//! planning, and execution.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{MigrateResult, MigrationError};
use crate::executor::Executor;
use crate::ledger::{LEDGER_TABLE, VersionLedger};
use crate::plan::{MigrationPlan, plan_down, plan_up};
use crate::reconcile::reconcile;
use crate::script::ScriptRegistry;
use crate::session::Session;
use crate::store::FileStore;
use crate::unit::Direction;

/// Configuration for the migration engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the migrations directory (holding `up/` and `down/`).
    pub migrations_dir: PathBuf,
    /// Name of the version table.
    pub ledger_table: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from("./migrations"),
            ledger_table: LEDGER_TABLE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the migrations directory.
    pub fn migrations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.migrations_dir = dir.into();
        self
    }

    /// Set the version table name.
    pub fn ledger_table(mut self, table: impl Into<String>) -> Self {
        self.ledger_table = table.into();
        self
    }
}

/// Lifecycle of one engine instance.
///
/// An engine runs at most one `up` or `down` in its lifetime; a second
/// invocation is a silent no-op. The state lives on the instance, not in
/// process-wide storage, so independent engines coexist within one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No `up`/`down` has run yet.
    Idle,
    /// An `up`/`down` is currently executing.
    Running,
    /// The run finished with every planned unit applied.
    Completed,
    /// The run aborted on a failing unit.
    Failed,
}

/// Result of a completed `up` or `down` run.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Traversal direction.
    pub direction: Direction,
    /// Versions applied, in execution order.
    pub applied: Vec<u64>,
    /// Total duration in milliseconds.
    pub duration_ms: i64,
}

impl MigrationReport {
    fn empty(direction: Direction) -> Self {
        Self {
            direction,
            applied: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Number of units applied.
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Whether anything ran.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Get a summary of the run.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            "no migrations applied".to_string()
        } else {
            format!(
                "{} {} unit(s) applied in {}ms",
                self.applied.len(),
                self.direction,
                self.duration_ms
            )
        }
    }
}

/// The migration engine.
///
/// Owns the session it is constructed with; all database access flows
/// through it. Planning state is never cached — each operation re-reads the
/// ledger and re-scans the artifact store.
pub struct MigrationEngine<S> {
    config: EngineConfig,
    store: FileStore,
    ledger: VersionLedger<S>,
    executor: Executor<S>,
    state: RunState,
}

impl<S: Session> MigrationEngine<S> {
    /// Create an engine over a session, with no script units registered.
    pub fn new(config: EngineConfig, session: S) -> Self {
        Self::with_scripts(config, session, ScriptRegistry::new())
    }

    /// Create an engine over a session and a script registry.
    pub fn with_scripts(config: EngineConfig, session: S, registry: ScriptRegistry) -> Self {
        let session = Arc::new(session);
        let store = FileStore::new(&config.migrations_dir);
        let ledger = VersionLedger::new(Arc::clone(&session)).with_table(&config.ledger_table);
        let executor = Executor::new(session, Arc::new(registry));
        Self {
            config,
            store,
            ledger,
            executor,
            state: RunState::Idle,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The artifact store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Apply forward migrations up to `target`, or to the highest available
    /// version when `target` is `None`.
    pub async fn up(&mut self, target: Option<u64>, verbose: bool) -> MigrateResult<MigrationReport> {
        self.run(Direction::Up, target, verbose).await
    }

    /// Revert migrations down to (but not including) `target`.
    pub async fn down(&mut self, target: u64, verbose: bool) -> MigrateResult<MigrationReport> {
        self.run(Direction::Down, Some(target), verbose).await
    }

    async fn run(
        &mut self,
        direction: Direction,
        target: Option<u64>,
        verbose: bool,
    ) -> MigrateResult<MigrationReport> {
        if self.state != RunState::Idle {
            debug!(state = ?self.state, "engine already ran; ignoring repeated invocation");
            return Ok(MigrationReport::empty(direction));
        }
        self.state = RunState::Running;

        match self.run_inner(direction, target, verbose).await {
            Ok(report) => {
                self.state = RunState::Completed;
                info!("{}", report.summary());
                Ok(report)
            }
            Err(e) => {
                self.state = RunState::Failed;
                Err(e)
            }
        }
    }

    async fn run_inner(
        &self,
        direction: Direction,
        target: Option<u64>,
        verbose: bool,
    ) -> MigrateResult<MigrationReport> {
        let start = Instant::now();

        let units = self.store.discover(direction).await?;
        let available: BTreeSet<u64> = units.keys().copied().collect();

        // Purge stale ledger rows, then re-read: the recorded version may
        // just have dropped to max(available).
        let recorded = self.ledger.current_version().await;
        reconcile(&self.ledger, &available, recorded).await?;
        let recorded = self.ledger.current_version().await.unwrap_or(0);

        let plan = self.plan(direction, &available, recorded, target)?;
        debug!("{}", plan.summary());

        let mut applied = Vec::with_capacity(plan.len());
        for version in &plan.versions {
            let unit = &units[version];
            self.executor.apply(unit, verbose).await?;
            applied.push(*version);
        }

        Ok(MigrationReport {
            direction,
            applied,
            duration_ms: start.elapsed().as_millis() as i64,
        })
    }

    fn plan(
        &self,
        direction: Direction,
        available: &BTreeSet<u64>,
        recorded: u64,
        target: Option<u64>,
    ) -> MigrateResult<MigrationPlan> {
        match direction {
            Direction::Up => plan_up(available, recorded, target),
            Direction::Down => {
                let target = target
                    .ok_or_else(|| MigrationError::other("down requires a target version"))?;
                Ok(plan_down(available, recorded, target))
            }
        }
    }

    /// Record a version as applied without executing anything.
    ///
    /// With no version given, the highest available `up` version is
    /// stamped. Useful when the schema was produced out-of-band.
    pub async fn stamp(&self, version: Option<u64>) -> MigrateResult<u64> {
        let version = match version {
            Some(v) => v,
            None => {
                let units = self.store.discover(Direction::Up).await?;
                match units.keys().next_back() {
                    Some(&max) => max,
                    None => {
                        return Err(MigrationError::other(
                            "no migration units available to stamp",
                        ));
                    }
                }
            }
        };
        self.ledger.insert_version(version).await?;
        info!(version, "stamped version as applied");
        Ok(version)
    }

    /// Delete a version's ledger rows, allowing its unit to be reapplied.
    ///
    /// Removing anything but the currently-highest applied version leaves
    /// the ledger inconsistent with ascending application order; that is
    /// the caller's responsibility.
    pub async fn remove(&self, version: u64) -> MigrateResult<()> {
        self.ledger.delete_version(version).await?;
        info!(version, "removed version from ledger");
        Ok(())
    }

    /// The highest recorded version, or `None` when the ledger is empty or
    /// its table absent.
    pub async fn current_version(&self) -> Option<u64> {
        self.ledger.current_version().await
    }

    /// Create the version table if it does not exist.
    pub async fn ensure_ledger(&self) -> MigrateResult<()> {
        self.ledger.ensure_table().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Shared observable state of the session fake.
    #[derive(Default)]
    struct SessionState {
        executed: Mutex<Vec<String>>,
        max_version: Mutex<Option<i64>>,
        fail_on: Mutex<Option<String>>,
    }

    impl SessionState {
        fn executed(&self) -> Vec<String> {
            self.executed.lock().clone()
        }

        fn fail_on(&self, needle: &str) {
            *self.fail_on.lock() = Some(needle.to_string());
        }
    }

    /// Session fake: records executed SQL, answers the ledger-max query
    /// from a programmable value, optionally fails on a SQL substring.
    struct RecordingSession {
        state: Arc<SessionState>,
        percent_substitution: bool,
    }

    #[async_trait]
    impl Session for RecordingSession {
        fn product(&self) -> &str {
            "fake"
        }

        fn percent_substitution(&self) -> bool {
            self.percent_substitution
        }

        async fn execute_batch(&self, sql: &str) -> MigrateResult<()> {
            if let Some(needle) = self.state.fail_on.lock().as_deref() {
                if sql.contains(needle) {
                    return Err(MigrationError::database(format!("forced failure: {needle}")));
                }
            }
            self.state.executed.lock().push(sql.to_string());
            Ok(())
        }

        async fn query_scalar(&self, _sql: &str) -> MigrateResult<Option<i64>> {
            Ok(*self.state.max_version.lock())
        }

        async fn commit(&self) -> MigrateResult<()> {
            Ok(())
        }

        async fn rollback(&self) -> MigrateResult<()> {
            Ok(())
        }
    }

    async fn engine_with_units(
        max_version: Option<i64>,
        files: &[(&str, &str)],
    ) -> (TempDir, Arc<SessionState>, MigrationEngine<RecordingSession>) {
        let tmp = TempDir::new().unwrap();
        for dir in ["up", "down"] {
            tokio::fs::create_dir_all(tmp.path().join(dir)).await.unwrap();
        }
        for (rel, content) in files {
            tokio::fs::write(tmp.path().join(rel), content).await.unwrap();
        }
        let state = Arc::new(SessionState {
            max_version: Mutex::new(max_version),
            ..Default::default()
        });
        let config = EngineConfig::new().migrations_dir(tmp.path());
        let engine = MigrationEngine::new(
            config,
            RecordingSession {
                state: Arc::clone(&state),
                percent_substitution: false,
            },
        );
        (tmp, state, engine)
    }

    #[tokio::test]
    async fn up_applies_pending_units_in_order() {
        let (_tmp, state, mut engine) = engine_with_units(
            Some(1),
            &[
                ("up/1.sql", "CREATE TABLE a (id INTEGER);"),
                ("up/2.sql", "CREATE TABLE b (id INTEGER);"),
                ("up/3.sql", "CREATE TABLE c (id INTEGER);"),
            ],
        )
        .await;

        let report = engine.up(None, false).await.unwrap();
        assert_eq!(report.applied, vec![2, 3]);
        assert_eq!(engine.state(), RunState::Completed);

        let executed = state.executed();
        assert!(executed[0].contains("TABLE b"));
        assert!(executed[1].contains("TABLE c"));
    }

    #[tokio::test]
    async fn second_invocation_is_a_silent_noop() {
        let (_tmp, state, mut engine) =
            engine_with_units(None, &[("up/1.sql", "CREATE TABLE a (id INTEGER);")]).await;

        let first = engine.up(None, false).await.unwrap();
        assert_eq!(first.applied, vec![1]);

        let second = engine.up(None, false).await.unwrap();
        assert!(second.is_empty());
        assert_eq!(engine.state(), RunState::Completed);
        // Exactly one execution happened across both calls.
        assert_eq!(state.executed().len(), 1);
    }

    #[tokio::test]
    async fn failed_unit_aborts_remaining_plan() {
        let (_tmp, state, mut engine) = engine_with_units(
            Some(3),
            &[
                ("down/3.sql", "DROP TABLE c;"),
                ("down/2.sql", "DROP TABLE b;"),
            ],
        )
        .await;
        state.fail_on("DROP TABLE c");

        let err = engine.down(1, false).await.unwrap_err();
        assert!(err.to_string().contains("down/3.sql"));
        assert_eq!(engine.state(), RunState::Failed);
        // Unit 2 never executed.
        assert!(state.executed().is_empty());
    }

    #[tokio::test]
    async fn down_requires_a_target() {
        let (_tmp, _state, mut engine) =
            engine_with_units(Some(1), &[("down/1.sql", "DROP TABLE a;")]).await;
        let err = engine.run(Direction::Down, None, false).await.unwrap_err();
        assert!(err.to_string().contains("target"));
    }

    #[tokio::test]
    async fn stamp_defaults_to_highest_available() {
        let (_tmp, state, engine) =
            engine_with_units(None, &[("up/1.sql", ""), ("up/4.sql", "")]).await;

        let stamped = engine.stamp(None).await.unwrap();
        assert_eq!(stamped, 4);
        assert!(state.executed().iter().any(|sql| sql.contains("VALUES (4)")));
    }

    #[tokio::test]
    async fn stamp_with_no_units_fails() {
        let (_tmp, _state, engine) = engine_with_units(None, &[]).await;
        assert!(engine.stamp(None).await.is_err());
    }

    #[tokio::test]
    async fn remove_issues_a_delete() {
        let (_tmp, state, engine) = engine_with_units(Some(2), &[("up/2.sql", "")]).await;
        engine.remove(2).await.unwrap();
        assert!(
            state
                .executed()
                .iter()
                .any(|sql| sql.contains("DELETE") && sql.contains("= 2"))
        );
    }

    #[tokio::test]
    async fn percent_doubling_applies_only_for_percent_param_drivers() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::create_dir_all(tmp.path().join("up")).await.unwrap();
        tokio::fs::write(
            tmp.path().join("up/1.sql"),
            "UPDATE t SET name = 'x' WHERE name LIKE 'a%';",
        )
        .await
        .unwrap();

        let state = Arc::new(SessionState::default());
        let config = EngineConfig::new().migrations_dir(tmp.path());
        let mut engine = MigrationEngine::new(
            config,
            RecordingSession {
                state: Arc::clone(&state),
                percent_substitution: true,
            },
        );
        engine.up(None, false).await.unwrap();

        let executed = state.executed();
        assert!(executed[0].contains("LIKE 'a%%'"));
    }

    #[tokio::test]
    async fn unregistered_script_unit_fails_with_its_name() {
        let (_tmp, _state, mut engine) = engine_with_units(None, &[("up/1.script", "")]).await;
        let err = engine.up(None, false).await.unwrap_err();
        assert!(err.to_string().contains("up/1.script"));
        assert_eq!(engine.state(), RunState::Failed);
    }

    #[tokio::test]
    async fn config_builder() {
        let config = EngineConfig::new()
            .migrations_dir("./schema/migrations")
            .ledger_table("schema_version");
        assert_eq!(config.migrations_dir, PathBuf::from("./schema/migrations"));
        assert_eq!(config.ledger_table, "schema_version");
    }
}
