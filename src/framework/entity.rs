//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every tracked collection
//! (Resource, Project, Task) implements to be managed by the generic `ResourceActor`.
//! It specifies associated types for IDs, DTOs, actions, context, and errors, and
//! provides lifecycle hooks (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Architecture Note
//! By defining a contract that all entity types must satisfy, the `ResourceActor`
//! logic (message loop, persistence, error plumbing) is written *once*.
//!
//! Associated types enforce type safety: a `Resource` actor accepts a
//! `ResourceCreate` payload, and you can't accidentally send it a `TaskCreate`.
//!
//! # Persistence
//! Entities are `Serialize + DeserializeOwned` because an actor may be backed by a
//! [`KeyValueStore`](crate::storage::KeyValueStore): the whole collection is loaded
//! at construction and written back after each successful mutation.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::is_mutation`]
//!
//! The default hooks do nothing (`Ok(())`); `is_mutation` defaults to `true`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g. a
/// project releasing its allocations in other actors). The `Context` type is
/// injected into every hook, so dependencies are bound when the actor is *run*,
/// not when it is constructed.
#[async_trait]
pub trait ActorEntity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing entity-specific operations (e.g. `Allocate`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies, policies) injected into the actor.
    /// Use `()` if nothing is needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per actor rather than one per message. Clients deal with a
    /// single `ResourceError` type, at the cost of some variants being impossible
    /// for some operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier this entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`; validation belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether `action` may change the entity. Only mutating actions trigger a
    /// write of the collection.
    fn is_mutation(_action: &Self::Action) -> bool {
        true
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and initialized.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    ///
    /// The actor applies the hook to a copy and commits it only on `Ok`, so an
    /// error leaves the stored entity untouched.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed. An error aborts the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom entity-specific action. Same commit-on-success rule as
    /// [`ActorEntity::on_update`].
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
