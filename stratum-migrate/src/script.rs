//! Scripted migration units.
//!
//! Scripted units replace the source-language habit of importing migration
//! modules by path at runtime: embedders implement [`ScriptUnit`] and
//! register it against a `(direction, version)` pair. A `<version>.script`
//! artifact on disk marks the version as script-typed during discovery; the
//! registry supplies the behavior when the executor reaches it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::MigrateResult;
use crate::session::Session;
use crate::unit::Direction;

/// A migration unit implemented in code rather than SQL text.
///
/// A script unit owns its whole transactional footprint: it must issue the
/// appropriate `db_version` insert or delete and commit or roll back on the
/// session it is handed, mirroring the convention SQL units follow in their
/// own text. The engine invokes it and otherwise stays out of the way.
#[async_trait]
pub trait ScriptUnit: Send + Sync {
    /// Apply (or revert) this unit against the session.
    async fn apply(&self, session: &dyn Session) -> MigrateResult<()>;
}

/// Registry of scripted units keyed by direction and version.
#[derive(Default, Clone)]
pub struct ScriptRegistry {
    units: HashMap<(Direction, u64), Arc<dyn ScriptUnit>>,
}

impl ScriptRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script unit for a direction and version.
    ///
    /// A later registration for the same pair replaces the earlier one.
    pub fn register(
        &mut self,
        direction: Direction,
        version: u64,
        unit: Arc<dyn ScriptUnit>,
    ) -> &mut Self {
        self.units.insert((direction, version), unit);
        self
    }

    /// Look up the script unit for a direction and version.
    pub fn get(&self, direction: Direction, version: u64) -> Option<Arc<dyn ScriptUnit>> {
        self.units.get(&(direction, version)).cloned()
    }

    /// Whether a script unit is registered for this direction and version.
    pub fn contains(&self, direction: Direction, version: u64) -> bool {
        self.units.contains_key(&(direction, version))
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl std::fmt::Debug for ScriptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRegistry")
            .field("units", &self.units.keys().collect::<Vec<_>>())
            .finish()
    }
}
