//! # Project Actor
//!
//! Projects are the consumers of the ledger: resources allocate units to a
//! project ID, and tasks point at their project ID. Neither side enforces the
//! reference, so what happens to those references when a project is deleted is
//! decided by a [`DeletionPolicy`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Project`]
//! - [`error`] - [`ProjectError`]
//! - [`actions`] - [`ProjectAction`] and [`ProjectActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependency Injection
//!
//! The actor is created first and its dependencies are handed over at run time,
//! after the ledger and task actors exist:
//!
//! ```rust,ignore
//! let (actor, generic_client) = project_actor::new(32, store.clone());
//! tokio::spawn(actor.run(ProjectContext {
//!     ledger: ledger_client.clone(),
//!     tasks: task_client.clone(),
//!     on_delete: DeletionPolicy::Cascade,
//! }));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{LedgerClient, TaskClient};
use crate::framework::{ResourceActor, ResourceClient};
use crate::model::{Project, ProjectId};
use crate::storage::{KeyValueStore, PROJECTS_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// What deleting a project does to the allocations and tasks that reference it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionPolicy {
    /// Release the project's units on every resource and delete its tasks.
    #[default]
    Cascade,
    /// Leave allocations and tasks pointing at the deleted ID.
    Orphan,
}

impl fmt::Display for DeletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionPolicy::Cascade => f.write_str("cascade"),
            DeletionPolicy::Orphan => f.write_str("orphan"),
        }
    }
}

impl FromStr for DeletionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cascade" => Ok(DeletionPolicy::Cascade),
            "orphan" => Ok(DeletionPolicy::Orphan),
            other => Err(format!("unknown deletion policy: {other}")),
        }
    }
}

/// Dependencies of the Project actor.
#[derive(Clone)]
pub struct ProjectContext {
    pub ledger: LedgerClient,
    pub tasks: TaskClient,
    pub on_delete: DeletionPolicy,
}

/// Creates a new Project actor backed by `store`, and its client.
pub fn new(
    buffer_size: usize,
    store: Arc<dyn KeyValueStore>,
) -> (ResourceActor<Project>, ResourceClient<Project>) {
    ResourceActor::with_storage(buffer_size, ProjectId::new, store, PROJECTS_KEY)
}
