//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the three collection actors.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them in `run(context)`:
//!
//! ```rust,ignore
//! impl ActorEntity for Resource { type Context = LedgerPolicy; }
//! impl ActorEntity for Task     { type Context = (); }
//! impl ActorEntity for Project  { type Context = ProjectContext; } // ledger + task clients
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - wait for all actor tasks to finish
//!
//! The dependency graph is acyclic (Project → Resource, Project → Task), so
//! channel closure alone terminates every actor.

pub mod tracing;
pub mod tracker_system;

pub use self::tracing::*;
pub use tracker_system::*;
