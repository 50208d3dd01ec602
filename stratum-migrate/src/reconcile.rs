//! Reconciliation of the version ledger against discovered artifacts.

use std::collections::BTreeSet;

use tracing::info;

use crate::error::MigrateResult;
use crate::ledger::VersionLedger;
use crate::session::Session;

/// Purge ledger rows for versions no longer present among the available
/// artifacts.
///
/// Artifacts can disappear from a working tree (squashed or rebased
/// history) while the target database still records having applied them.
/// Left alone, those rows pin the recorded version above anything the
/// planner will ever look at again. So: when a version is recorded and any
/// artifacts exist, delete every row strictly above `max(available)` and at
/// or below the recorded version. Runs before planning in both directions,
/// and is idempotent — a second pass over unchanged inputs deletes nothing.
pub async fn reconcile<S: Session>(
    ledger: &VersionLedger<S>,
    available: &BTreeSet<u64>,
    recorded: Option<u64>,
) -> MigrateResult<()> {
    let Some(recorded) = recorded.filter(|&r| r > 0) else {
        return Ok(());
    };
    let Some(&ceiling) = available.iter().next_back() else {
        return Ok(());
    };

    if recorded > ceiling {
        info!(
            from = ceiling + 1,
            to = recorded,
            "purging ledger entries with no matching migration artifact"
        );
        ledger.delete_range(ceiling, recorded).await?;
    }

    Ok(())
}
