//! Read-only derivations over the collections: filtered lists, the status
//! board and the dashboard. Everything here works on a [`Snapshot`] and never
//! talks to an actor.

pub mod board;
pub mod dashboard;
pub mod filters;

pub use board::*;
pub use dashboard::*;
pub use filters::*;

use crate::model::{Project, ProjectId, Resource, Task};
use serde::Serialize;

/// The three collections as read at one point in time.
///
/// Projects and tasks are newest first; resources oldest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub resources: Vec<Resource>,
}

impl Snapshot {
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Display name for an allocation consumer; deleted projects show their raw ID.
    pub fn consumer_name(&self, id: &ProjectId) -> String {
        self.project(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
