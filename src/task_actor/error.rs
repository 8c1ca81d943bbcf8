//! Error types for the Task actor.

use thiserror::Error;

/// Errors that can occur during task operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskError {
    /// The requested task was not found.
    #[error("Task not found: {0}")]
    NotFound(String),

    /// The task has no subtask with this ID.
    #[error("Subtask not found: {0}")]
    SubTaskNotFound(String),

    /// A title or an hour count failed validation.
    #[error("Invalid task: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TaskError {
    fn from(msg: String) -> Self {
        TaskError::ActorCommunicationError(msg)
    }
}
