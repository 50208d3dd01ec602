//! The database session boundary.
//!
//! Everything the engine needs from a database is expressed through the
//! [`Session`] trait: raw SQL execution, transactional commit/rollback, and
//! scalar queries. A session is injected into the engine at construction
//! time, so tests substitute fakes and embedders bring their own backend.

use async_trait::async_trait;

use crate::error::MigrateResult;

/// A live database session owned by exactly one engine.
///
/// Implementations keep an implicit transaction open across
/// [`execute_batch`](Session::execute_batch) calls, beginning one lazily and
/// ending it on [`commit`](Session::commit) or [`rollback`](Session::rollback).
/// Both of those are no-ops when no transaction is open, which lets callers
/// roll back unconditionally on failure paths.
#[async_trait]
pub trait Session: Send + Sync {
    /// Name of the underlying database product, e.g. `"sqlite"` or
    /// `"postgres"`. Consumed only by vendor tooling outside the engine.
    fn product(&self) -> &str;

    /// Whether the driver treats `%` as parameter-substitution syntax.
    ///
    /// When true, the executor doubles literal percent signs in SQL unit
    /// text before execution so dumped DDL survives the driver untouched.
    fn percent_substitution(&self) -> bool {
        false
    }

    /// Execute raw SQL text, possibly several statements, inside the
    /// session's current transaction.
    async fn execute_batch(&self, sql: &str) -> MigrateResult<()>;

    /// Run a query expected to produce a single scalar, returning `None`
    /// for SQL NULL or an empty result set.
    async fn query_scalar(&self, sql: &str) -> MigrateResult<Option<i64>>;

    /// Commit the current transaction, if any.
    async fn commit(&self) -> MigrateResult<()>;

    /// Roll back the current transaction, if any.
    async fn rollback(&self) -> MigrateResult<()>;
}
