//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient),
//! one per collection.

pub mod ledger_client;
pub mod project_client;
pub mod task_client;

pub use ledger_client::*;
pub use project_client::*;
pub use task_client::*;
