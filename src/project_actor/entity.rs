//! ActorEntity trait implementation for the Project domain type.
//!
//! The `on_delete` hook is where the [`DeletionPolicy`] is applied: with
//! `Cascade` it releases the project's allocations through the
//! [`LedgerClient`](crate::clients::LedgerClient) and deletes its tasks through the
//! [`TaskClient`](crate::clients::TaskClient) before the project itself goes away.

use super::actions::{ProjectAction, ProjectActionResult};
use super::error::ProjectError;
use super::{DeletionPolicy, ProjectContext};
use crate::model::{Attachment, Project, ProjectCreate, ProjectId, ProjectStatus, ProjectUpdate};
use crate::framework::ActorEntity;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Project {
    type Id = ProjectId;
    type Create = ProjectCreate;
    type Update = ProjectUpdate;
    type Action = ProjectAction;
    type ActionResult = ProjectActionResult;
    type Context = ProjectContext;
    type Error = ProjectError;

    fn id(&self) -> &ProjectId {
        &self.id
    }

    /// New projects always start in [`ProjectStatus::Open`].
    fn from_create_params(id: ProjectId, params: ProjectCreate) -> Result<Self, ProjectError> {
        let project = Self {
            id,
            name: required(&params.name, "Project name is required")?,
            description: params.description.trim().to_string(),
            department: required(&params.department, "Department is required")?,
            sponsor: optional(params.sponsor),
            duration_start: params.duration_start,
            duration_end: params.duration_end,
            skillset: optional(params.skillset),
            attachments: Vec::new(),
            status: ProjectStatus::Open,
        };
        check_duration(project.duration_start, project.duration_end)?;
        params
            .attachments
            .into_iter()
            .try_fold(project, |mut project, attachment| {
                project.attachments.push(validate_attachment(attachment)?);
                Ok(project)
            })
    }

    async fn on_update(
        &mut self,
        update: ProjectUpdate,
        _ctx: &ProjectContext,
    ) -> Result<(), ProjectError> {
        if let Some(name) = update.name {
            self.name = required(&name, "Project name is required")?;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(department) = update.department {
            self.department = required(&department, "Department is required")?;
        }
        if let Some(sponsor) = update.sponsor {
            self.sponsor = optional(sponsor);
        }
        if let Some(start) = update.duration_start {
            self.duration_start = start;
        }
        if let Some(end) = update.duration_end {
            self.duration_end = end;
        }
        if let Some(skillset) = update.skillset {
            self.skillset = optional(skillset);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        check_duration(self.duration_start, self.duration_end)
    }

    async fn on_delete(&self, ctx: &ProjectContext) -> Result<(), ProjectError> {
        match ctx.on_delete {
            DeletionPolicy::Orphan => {
                debug!(project = %self.id, "Leaving allocations and tasks in place");
                Ok(())
            }
            DeletionPolicy::Cascade => {
                let released = ctx
                    .ledger
                    .release_consumer(self.id)
                    .await
                    .map_err(|e| ProjectError::CascadeFailed(e.to_string()))?;
                let tasks = ctx
                    .tasks
                    .delete_for_project(self.id)
                    .await
                    .map_err(|e| ProjectError::CascadeFailed(e.to_string()))?;
                info!(project = %self.id, released, tasks, "Cascade complete");
                Ok(())
            }
        }
    }

    async fn handle_action(
        &mut self,
        action: ProjectAction,
        _ctx: &ProjectContext,
    ) -> Result<ProjectActionResult, ProjectError> {
        match action {
            ProjectAction::SetStatus(status) => {
                let previous = std::mem::replace(&mut self.status, status);
                Ok(ProjectActionResult::SetStatus(previous))
            }
            ProjectAction::AddAttachment(attachment) => {
                self.attachments.push(validate_attachment(attachment)?);
                Ok(ProjectActionResult::AddAttachment(self.attachments.len()))
            }
            ProjectAction::RemoveAttachment(index) => {
                if index >= self.attachments.len() {
                    return Err(ProjectError::AttachmentNotFound(index));
                }
                Ok(ProjectActionResult::RemoveAttachment(
                    self.attachments.remove(index),
                ))
            }
        }
    }
}

fn required(value: &str, message: &str) -> Result<String, ProjectError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ProjectError::ValidationError(message.to_string()));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn check_duration(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ProjectError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ProjectError::ValidationError(format!(
            "duration ends ({end}) before it starts ({start})"
        ))),
        _ => Ok(()),
    }
}

fn validate_attachment(attachment: Attachment) -> Result<Attachment, ProjectError> {
    if attachment.name.trim().is_empty() {
        return Err(ProjectError::ValidationError(
            "attachment name is required".to_string(),
        ));
    }
    Ok(attachment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(name: &str, department: &str) -> ProjectCreate {
        ProjectCreate {
            name: name.to_string(),
            department: department.to_string(),
            ..ProjectCreate::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_requires_name_and_department() {
        let missing_name = Project::from_create_params(ProjectId::new(), params(" ", "IT"));
        assert_eq!(
            missing_name.unwrap_err(),
            ProjectError::ValidationError("Project name is required".into())
        );
        let missing_dept = Project::from_create_params(ProjectId::new(), params("Portal", ""));
        assert!(matches!(missing_dept, Err(ProjectError::ValidationError(_))));

        let mut p = params(" Portal ", " IT ");
        p.sponsor = Some("  ".into());
        let project = Project::from_create_params(ProjectId::new(), p).unwrap();
        assert_eq!(project.name, "Portal");
        assert_eq!(project.department, "IT");
        assert_eq!(project.sponsor, None);
        assert_eq!(project.status, ProjectStatus::Open);
    }

    #[test]
    fn test_create_rejects_inverted_duration() {
        let mut p = params("Portal", "IT");
        p.duration_start = Some(date(2024, 5, 1));
        p.duration_end = Some(date(2024, 4, 1));
        assert!(matches!(
            Project::from_create_params(ProjectId::new(), p),
            Err(ProjectError::ValidationError(_))
        ));
    }

    #[test]
    fn test_create_keeps_attachments() {
        let mut p = params("Portal", "IT");
        p.attachments = vec![Attachment {
            name: "brief.pdf".into(),
            mime_type: "application/pdf".into(),
            data: "data:application/pdf;base64,AA==".into(),
        }];
        let project = Project::from_create_params(ProjectId::new(), p).unwrap();
        assert_eq!(project.attachments.len(), 1);
    }
}
