//! ActorEntity trait implementation for the Task domain type.

use super::actions::{TaskAction, TaskActionResult};
use super::error::TaskError;
use crate::framework::ActorEntity;
use crate::model::{SubTask, SubTaskId, Task, TaskCreate, TaskId, TaskUpdate};
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for Task {
    type Id = TaskId;
    type Create = TaskCreate;
    type Update = TaskUpdate;
    type Action = TaskAction;
    type ActionResult = TaskActionResult;
    type Context = ();
    type Error = TaskError;

    fn id(&self) -> &TaskId {
        &self.id
    }

    /// Creates a new Task stamped with the current time.
    ///
    /// The owning project is not checked; a task may outlive its project when
    /// projects are deleted with the orphan policy.
    fn from_create_params(id: TaskId, params: TaskCreate) -> Result<Self, TaskError> {
        Ok(Self {
            id,
            project_id: params.project_id,
            title: validate_title(&params.title, "Task title is required")?,
            description: params.description.trim().to_string(),
            estimated_hours: validate_hours(params.estimated_hours)?,
            actual_hours: validate_hours(params.actual_hours)?,
            status: params.status,
            sub_tasks: Vec::new(),
            created: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: TaskUpdate, _ctx: &()) -> Result<(), TaskError> {
        if let Some(title) = update.title {
            self.title = validate_title(&title, "Task title is required")?;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(hours) = update.estimated_hours {
            self.estimated_hours = validate_hours(hours)?;
        }
        if let Some(hours) = update.actual_hours {
            self.actual_hours = validate_hours(hours)?;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TaskAction,
        _ctx: &(),
    ) -> Result<TaskActionResult, TaskError> {
        match action {
            TaskAction::SetStatus(status) => {
                let previous = std::mem::replace(&mut self.status, status);
                Ok(TaskActionResult::SetStatus(previous))
            }
            TaskAction::AddSubTask(params) => {
                let sub_task = SubTask {
                    id: SubTaskId::new(),
                    title: validate_title(&params.title, "Subtask title is required")?,
                    estimated_hours: validate_hours(params.estimated_hours)?,
                    actual_hours: validate_hours(params.actual_hours)?,
                };
                let id = sub_task.id;
                self.sub_tasks.insert(0, sub_task);
                Ok(TaskActionResult::AddSubTask(id))
            }
            TaskAction::UpdateSubTask { id, update } => {
                let sub_task = self
                    .sub_tasks
                    .iter_mut()
                    .find(|st| st.id == id)
                    .ok_or_else(|| TaskError::SubTaskNotFound(id.to_string()))?;
                if let Some(title) = update.title {
                    sub_task.title = validate_title(&title, "Subtask title is required")?;
                }
                if let Some(hours) = update.estimated_hours {
                    sub_task.estimated_hours = validate_hours(hours)?;
                }
                if let Some(hours) = update.actual_hours {
                    sub_task.actual_hours = validate_hours(hours)?;
                }
                Ok(TaskActionResult::UpdateSubTask(sub_task.clone()))
            }
            TaskAction::RemoveSubTask(id) => {
                let index = self
                    .sub_tasks
                    .iter()
                    .position(|st| st.id == id)
                    .ok_or_else(|| TaskError::SubTaskNotFound(id.to_string()))?;
                Ok(TaskActionResult::RemoveSubTask(self.sub_tasks.remove(index)))
            }
        }
    }
}

fn validate_title(title: &str, message: &str) -> Result<String, TaskError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::ValidationError(message.to_string()));
    }
    Ok(title.to_string())
}

fn validate_hours(hours: f64) -> Result<f64, TaskError> {
    if !hours.is_finite() {
        return Err(TaskError::ValidationError(
            "Hours must be a number".to_string(),
        ));
    }
    if hours < 0.0 {
        return Err(TaskError::ValidationError(
            "Hours cannot be negative".to_string(),
        ));
    }
    Ok(hours)
}
