//! Custom actions for the Project actor.

use crate::model::{Attachment, ProjectStatus};

/// Custom actions for Project entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectAction {
    /// Moves the project to another column of the status board.
    SetStatus(ProjectStatus),
    /// Appends an attachment.
    AddAttachment(Attachment),
    /// Removes the attachment at this position.
    RemoveAttachment(usize),
}

/// Results from ProjectActions - variants match 1:1 with ProjectAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectActionResult {
    /// The status before the change.
    SetStatus(ProjectStatus),
    /// Number of attachments after the addition.
    AddAttachment(usize),
    /// The attachment that was removed.
    RemoveAttachment(Attachment),
}
