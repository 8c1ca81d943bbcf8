//! # Resource Actor
//!
//! The resource allocation ledger: shared pools of capacity (teams, machines)
//! whose units are handed out to projects.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Resource`]
//! - [`error`] - [`ResourceError`] type for type-safe error handling
//! - [`actions`] - [`ResourceAction`] and [`ResourceActionResult`] for allocation
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Invariant
//!
//! After every allocate and deallocate, `sum(allocated) <= total`. Editing
//! `total` may break it unless [`LedgerPolicy::enforce_capacity_on_update`] is
//! set, in which case `available_units()` reports a negative value.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, generic_client) = resource_actor::new(32, store);
//! let ledger = LedgerClient::new(generic_client);
//! tokio::spawn(actor.run(LedgerPolicy::default()));
//!
//! let qa = ledger.create_resource(ResourceCreate { name: "QA Team".into(), total: 5, skillset: None }).await?;
//! ledger.allocate(qa, project_id, 3).await?;
//! assert_eq!(ledger.available_units(qa).await?, 2);
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::{Resource, ResourceId};
use crate::storage::{KeyValueStore, RESOURCES_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How the ledger treats the two gaps the capacity invariant leaves open.
///
/// Both default to `false`, keeping data written by earlier versions valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerPolicy {
    /// Reject an edit that lowers `total` below the units already allocated.
    pub enforce_capacity_on_update: bool,
    /// Remove a consumer's entry once deallocation brings it to zero.
    pub prune_empty_allocations: bool,
}

/// Creates a new Resource actor backed by `store`, and its client.
pub fn new(
    buffer_size: usize,
    store: Arc<dyn KeyValueStore>,
) -> (ResourceActor<Resource>, ResourceClient<Resource>) {
    ResourceActor::with_storage(buffer_size, ResourceId::new, store, RESOURCES_KEY)
}
