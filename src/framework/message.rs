//! # Generic Messages
//!
//! The request type exchanged between [`ResourceClient`](super::ResourceClient)
//! and [`ResourceActor`](super::ResourceActor).

use super::entity::ActorEntity;
use super::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to an actor to request an operation.
///
/// # The CRUD Pattern
/// The variants map to standard **CRUD** operations on a collection, plus a custom
/// `Action` variant for entity-specific logic that doesn't fit CRUD:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new entity.
/// - **Get / List**: Reads one entity by ID, or the whole collection in insertion order.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing entity.
/// - **Delete / Clear**: Removes one entity, or every entity in the collection.
/// - **Action**: Executes a custom [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    /// Removes every entity; responds with how many were removed.
    Clear { respond_to: Response<usize> },
}
