//! Custom actions for the Task actor: status changes and subtask editing.

use crate::model::{SubTask, SubTaskCreate, SubTaskId, SubTaskUpdate, TaskStatus};

/// Custom actions for Task entities.
#[derive(Debug, Clone)]
pub enum TaskAction {
    /// Moves the task to another column of the workflow.
    SetStatus(TaskStatus),
    /// Adds a subtask in front of the existing ones.
    AddSubTask(SubTaskCreate),
    /// Edits one subtask in place.
    UpdateSubTask { id: SubTaskId, update: SubTaskUpdate },
    /// Removes one subtask.
    RemoveSubTask(SubTaskId),
}

/// Results from TaskActions - variants match 1:1 with TaskAction
#[derive(Debug, Clone, PartialEq)]
pub enum TaskActionResult {
    /// The status before the change.
    SetStatus(TaskStatus),
    AddSubTask(SubTaskId),
    UpdateSubTask(SubTask),
    /// The subtask that was removed.
    RemoveSubTask(SubTask),
}
