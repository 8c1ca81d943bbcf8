//! Error types for the Resource actor.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A name, total or amount failed validation.
    #[error("Invalid resource: {0}")]
    ValidationError(String),

    /// The allocation would exceed the units still available.
    #[error("Capacity exceeded: requested {requested}, available {available}")]
    CapacityExceeded { requested: u32, available: i64 },

    /// The consumer holds fewer units than it tried to release.
    #[error("Insufficient allocation: requested {requested}, allocated {allocated}")]
    InsufficientAllocation { requested: u32, allocated: u32 },

    /// A new total would not cover the units already allocated.
    #[error("Total {total} is below the {allocated} units already allocated")]
    TotalBelowAllocated { total: u32, allocated: u64 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ResourceError {
    fn from(msg: String) -> Self {
        ResourceError::ActorCommunicationError(msg)
    }
}
