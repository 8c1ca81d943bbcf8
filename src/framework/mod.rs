//! Generic actor framework for collection management.
//!
//! This module provides the building blocks for type-safe actor systems that own
//! entity collections with CRUD operations and custom actions.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that entity types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns one collection
//! - [`ResourceClient`] - Type-safe client for talking to a `ResourceActor`
//! - [`ActorClient`] - Default read/delete methods for collection-specific clients
//! - [`FrameworkError`] - Errors of the plumbing itself
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
