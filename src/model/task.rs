use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::project::normalize_label;
use super::ProjectId;

entity_id!(
    /// Type-safe identifier for Tasks.
    TaskId
);

entity_id!(
    /// Identifier of a subtask, unique within the whole tracker.
    SubTaskId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Open,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Blocked => "Blocked",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        TaskStatus::ALL
            .into_iter()
            .find(|status| normalize_label(status.label()) == wanted)
            .ok_or_else(|| format!("unknown task status: {s}"))
    }
}

/// A unit of work belonging to a project.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](crate::framework::ResourceActor); subtasks are
/// edited through [`TaskAction`](crate::task_actor::TaskAction)s on the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    #[serde(default)]
    pub status: TaskStatus,
    /// Newest first.
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: SubTaskId,
    pub title: String,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
}

/// Payload for creating a new task.
#[derive(Debug, Clone)]
pub struct TaskCreate {
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub status: TaskStatus,
}

impl TaskCreate {
    /// A task with only a title; hours zero, status `Open`.
    pub fn titled(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: String::new(),
            estimated_hours: 0.0,
            actual_hours: 0.0,
            status: TaskStatus::Open,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone)]
pub struct SubTaskCreate {
    pub title: String,
    pub estimated_hours: f64,
    pub actual_hours: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SubTaskUpdate {
    pub title: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
}
