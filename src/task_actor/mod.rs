//! # Task Actor
//!
//! Tasks belong to a project by ID and carry their subtasks inline, so adding or
//! editing a subtask is an action on the parent task.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Task`]
//! - [`error`] - [`TaskError`]
//! - [`actions`] - [`TaskAction`] and [`TaskActionResult`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::{Task, TaskId};
use crate::storage::{KeyValueStore, TASKS_KEY};
use std::sync::Arc;

/// Creates a new Task actor backed by `store`, and its client.
///
/// The actor needs no dependencies: run it with `actor.run(())`.
pub fn new(
    buffer_size: usize,
    store: Arc<dyn KeyValueStore>,
) -> (ResourceActor<Task>, ResourceClient<Task>) {
    ResourceActor::with_storage(buffer_size, TaskId::new, store, TASKS_KEY)
}
