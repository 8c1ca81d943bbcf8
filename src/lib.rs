//! # pm-tracker
//!
//! > **A project-management tracker built on resource-oriented actors.**
//!
//! Projects, tasks and shared resources live in three typed collections. Each
//! collection is owned by one Tokio task (a `ResourceActor`) that processes
//! requests sequentially and writes the whole collection to a key-value store
//! after every successful change.
//!
//! At the centre sits the **resource allocation ledger**: a resource is a pool of
//! `total` units, and projects receive whole units of it. After every allocate
//! and deallocate, `sum(allocated) <= total` holds.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` and the [`ActorEntity`](framework::ActorEntity)
//! trait. Separates the *business logic* (your entity) from the *plumbing*
//! (channels, message loops, persistence, error handling).
//!
//! ### 2. The Collections ([`resource_actor`], [`project_actor`], [`task_actor`])
//! Concrete `ActorEntity` implementations over the records in [`model`]. Every
//! rule about what a valid entity is lives here.
//!
//! ### 3. The Interface ([`clients`])
//! [`LedgerClient`](clients::LedgerClient), [`ProjectClient`](clients::ProjectClient)
//! and [`TaskClient`](clients::TaskClient) wrap the generic `ResourceClient` with typed
//! methods and per-collection error types.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`TrackerSystem`](lifecycle::TrackerSystem) spins up the actors, injects the
//! project actor's dependencies and shuts everything down.
//!
//! ### 5. Around the core
//! - [`storage`]: the key-value persistence surface (memory or one JSON file per key).
//! - [`config`]: TOML configuration, including the ledger and deletion policies.
//! - [`views`]: filters, the status board and the dashboard summary.
//! - [`export`]: CSV and XLSX rendering of any collection.
//!
//! ## 🚀 Quick Start
//!
//! ```rust,no_run
//! use pm_tracker::config::TrackerConfig;
//! use pm_tracker::lifecycle::TrackerSystem;
//! use pm_tracker::model::{ProjectCreate, ResourceCreate};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(pm_tracker::storage::MemoryStore::new());
//!     let system = TrackerSystem::new(&TrackerConfig::default(), store);
//!
//!     let portal = system
//!         .project_client
//!         .create_project(ProjectCreate {
//!             name: "Portal".into(),
//!             department: "IT".into(),
//!             ..ProjectCreate::default()
//!         })
//!         .await?;
//!     let qa = system
//!         .ledger_client
//!         .create_resource(ResourceCreate { name: "QA Team".into(), total: 5, skillset: None })
//!         .await?;
//!
//!     system.ledger_client.allocate(qa, portal, 3).await?;
//!     assert_eq!(system.ledger_client.available_units(qa).await?, 2);
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## 🧪 Testing
//!
//! See [`framework::mock`] for utilities to test clients without spawning full actors.

pub mod clients;
pub mod config;
pub mod export;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod project_actor;
pub mod resource_actor;
pub mod storage;
pub mod task_actor;
pub mod views;
