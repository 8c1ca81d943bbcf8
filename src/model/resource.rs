/// Represents a shared pool of allocatable capacity (e.g. a team).
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Resource`](#impl-ActorEntity-for-Resource) for details on:
/// - Creation parameters ([`ResourceCreate`])
/// - Update parameters ([`ResourceUpdate`])
/// - Custom actions ([`ResourceAction`](crate::resource_actor::ResourceAction))
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ProjectId;

entity_id!(
    /// Type-safe identifier for Resources.
    ResourceId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    /// Capacity in whole units.
    pub total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skillset: Option<String>,
    /// Units held by each consuming project.
    #[serde(default)]
    pub allocated: BTreeMap<ProjectId, u32>,
}

impl Resource {
    /// Creates a new Resource with no allocations.
    pub fn new(
        id: ResourceId,
        name: impl Into<String>,
        total: u32,
        skillset: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            total,
            skillset,
            allocated: BTreeMap::new(),
        }
    }

    /// Sum of all units currently allocated to consumers.
    pub fn allocated_units(&self) -> u64 {
        self.allocated.values().map(|&units| u64::from(units)).sum()
    }

    /// `total - allocated_units()`.
    ///
    /// Negative only when `total` was lowered below the allocated sum while
    /// capacity enforcement on update was disabled.
    pub fn available_units(&self) -> i64 {
        i64::from(self.total) - self.allocated_units() as i64
    }

    /// Units held by `consumer`, treating a missing entry as zero.
    pub fn allocated_to(&self, consumer: &ProjectId) -> u32 {
        self.allocated.get(consumer).copied().unwrap_or(0)
    }
}

/// Payload for creating a new resource.
#[derive(Debug, Clone)]
pub struct ResourceCreate {
    pub name: String,
    pub total: u32,
    pub skillset: Option<String>,
}

/// Payload for editing an existing resource. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceUpdate {
    pub name: Option<String>,
    pub total: Option<u32>,
    /// `Some(None)` clears the tag.
    pub skillset: Option<Option<String>>,
}
