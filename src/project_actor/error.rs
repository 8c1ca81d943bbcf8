//! Error types for the Project actor.

use thiserror::Error;

/// Errors that can occur during project operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectError {
    /// The requested project was not found.
    #[error("Project not found: {0}")]
    NotFound(String),

    /// A required field is blank or a value is out of range.
    #[error("Invalid project: {0}")]
    ValidationError(String),

    /// No attachment at this position.
    #[error("Attachment not found at index {0}")]
    AttachmentNotFound(usize),

    /// Releasing allocations or deleting tasks failed; the project was kept.
    #[error("Cascade delete failed: {0}")]
    CascadeFailed(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProjectError {
    fn from(msg: String) -> Self {
        ProjectError::ActorCommunicationError(msg)
    }
}
