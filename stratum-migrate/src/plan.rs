//! Planning: which versions to run, in which order.

use std::collections::BTreeSet;
use std::ops::Bound;

use crate::error::{MigrateResult, MigrationError};
use crate::unit::Direction;

/// An ordered list of versions to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// Traversal direction.
    pub direction: Direction,
    /// Versions in execution order: ascending for up, descending for down.
    pub versions: Vec<u64>,
}

impl MigrationPlan {
    /// An empty plan for a direction.
    pub fn empty(direction: Direction) -> Self {
        Self {
            direction,
            versions: Vec::new(),
        }
    }

    /// Whether there is nothing to execute.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Number of planned units.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Get a summary of the plan.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            format!("nothing to migrate ({})", self.direction)
        } else {
            let list = self
                .versions
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} {} unit(s): {}", self.versions.len(), self.direction, list)
        }
    }
}

/// Compute the forward plan.
///
/// With no explicit target the highest available version is used. An
/// explicit target must exist among the available versions. Target 0 is
/// special: it plans exactly the version-0 unit alone (initial schema
/// creation), never combined with other versions. Otherwise the plan is the
/// ascending run of available versions in `(recorded, target]`, excluding 0;
/// gaps are simply absent.
pub fn plan_up(
    available: &BTreeSet<u64>,
    recorded: u64,
    target: Option<u64>,
) -> MigrateResult<MigrationPlan> {
    let target = match target {
        Some(t) => {
            if !available.contains(&t) {
                return Err(MigrationError::version_not_found(t, Direction::Up));
            }
            t
        }
        None => match available.iter().next_back() {
            Some(&max) => max,
            None => return Ok(MigrationPlan::empty(Direction::Up)),
        },
    };

    if target == 0 {
        return Ok(MigrationPlan {
            direction: Direction::Up,
            versions: vec![0],
        });
    }

    // Already at or past the target.
    if target <= recorded {
        return Ok(MigrationPlan::empty(Direction::Up));
    }

    let versions = available
        .range((Bound::Excluded(recorded), Bound::Included(target)))
        .copied()
        .filter(|&v| v != 0)
        .collect();

    Ok(MigrationPlan {
        direction: Direction::Up,
        versions,
    })
}

/// Compute the backward plan: the descending run of available versions in
/// `(target, recorded]`.
///
/// Descending order is mandatory — the most recently applied change is
/// undone first. The target is the caller's responsibility; a target equal
/// to the recorded version yields an empty plan.
pub fn plan_down(available: &BTreeSet<u64>, recorded: u64, target: u64) -> MigrationPlan {
    // Nothing recorded above the target.
    if target >= recorded {
        return MigrationPlan::empty(Direction::Down);
    }

    let versions = available
        .range((Bound::Excluded(target), Bound::Included(recorded)))
        .rev()
        .copied()
        .collect();

    MigrationPlan {
        direction: Direction::Down,
        versions,
    }
}
