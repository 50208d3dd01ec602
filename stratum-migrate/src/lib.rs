//! # stratum-migrate
//!
//! Migration engine for Stratum: hand-authored, numbered SQL (or scripted)
//! migration units applied and reverted against a relational database, with
//! applied state tracked in a `db_version` table.
//!
//! This crate exists for the schema changes an ORM cannot faithfully
//! express — composite or partial indexes, foreign keys absent from object
//! mappings, vendor-specific DDL. Units are authored by hand; the engine
//! only bookkeeps and executes.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌───────────────┐   ┌──────────┐
//! │ FileStore  │──▶│  reconcile()  │──▶│ plan_*() │
//! └────────────┘   └───────────────┘   └──────────┘
//!        ▲                 │                 │
//!        │                 ▼                 ▼
//! ┌────────────┐   ┌───────────────┐   ┌──────────┐
//! │ migrations/│   │ VersionLedger │◀──│ Executor │
//! │  up/ down/ │   │  (db_version) │   └──────────┘
//! └────────────┘   └───────────────┘
//! ```
//!
//! [`MigrationEngine`] coordinates: discover the available units, read the
//! recorded version, purge stale ledger rows, compute the ordered plan, and
//! apply one unit per transaction. A unit's own SQL carries its ledger
//! insert or delete; the engine writes ledger rows only for `stamp` and
//! `remove`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stratum_migrate::{EngineConfig, MigrationEngine};
//!
//! async fn migrate(session: impl stratum_migrate::Session) -> stratum_migrate::MigrateResult<()> {
//!     let config = EngineConfig::new().migrations_dir("./migrations");
//!     let mut engine = MigrationEngine::new(config, session);
//!
//!     let report = engine.up(None, false).await?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Migration artifacts
//!
//! ```text
//! migrations/
//! ├── up/
//! │   ├── 0.sql       # initial schema creation (dump capture)
//! │   ├── 1.sql
//! │   └── 2.script    # marker for a registered ScriptUnit
//! └── down/
//!     ├── 1.sql
//!     └── 2.script
//! ```
//!
//! Each invocation of the engine runs at most one `up`/`down`; the guard is
//! per engine instance, not process-wide, so several engines coexist in one
//! process (tests included). Concurrent runs from separate processes are
//! not coordinated — serialize them externally.

pub mod engine;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod plan;
pub mod reconcile;
pub mod script;
pub mod session;
pub mod store;
pub mod unit;

// Re-exports
pub use engine::{EngineConfig, MigrationEngine, MigrationReport, RunState};
pub use error::{MigrateResult, MigrationError};
pub use executor::Executor;
pub use ledger::{LEDGER_TABLE, VersionLedger};
pub use plan::{MigrationPlan, plan_down, plan_up};
pub use reconcile::reconcile;
pub use script::{ScriptRegistry, ScriptUnit};
pub use session::Session;
pub use store::FileStore;
pub use unit::{Direction, MigrationUnit, UnitKind};
