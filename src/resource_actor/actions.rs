//! Custom actions for the Resource actor.
//!
//! The ledger operations that go beyond CRUD: moving units between a resource's
//! free pool and its consumers. They are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

use crate::model::ProjectId;

/// Custom actions for Resource entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAction {
    /// Moves `amount` units from the free pool to `consumer`.
    ///
    /// # Errors
    /// Fails if `amount` is zero or exceeds the available units.
    Allocate { consumer: ProjectId, amount: u32 },
    /// Returns `amount` units held by `consumer` to the free pool.
    ///
    /// # Errors
    /// Fails if `amount` is zero or exceeds what `consumer` holds.
    Deallocate { consumer: ProjectId, amount: u32 },
    /// Reads the available units without modifying anything.
    CheckAvailable,
    /// Drops every unit held by `consumer`. Succeeds with zero if it holds none.
    ReleaseConsumer(ProjectId),
}

/// Results from ResourceActions - variants match 1:1 with ResourceAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceActionResult {
    /// Units now held by the consumer.
    Allocate(u32),
    /// Units still held by the consumer.
    Deallocate(u32),
    /// `total - sum(allocated)`.
    CheckAvailable(i64),
    /// Units that were released.
    ReleaseConsumer(u32),
}
