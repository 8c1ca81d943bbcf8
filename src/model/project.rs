use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

entity_id!(
    /// Type-safe identifier for Projects. Also the consumer key in resource allocations.
    ProjectId
);

/// Lifecycle stage of a project, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Open,
    #[serde(rename = "WIP")]
    Wip,
    #[serde(rename = "Under Development")]
    UnderDevelopment,
    #[serde(rename = "Internal UAT")]
    InternalUat,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Open,
        ProjectStatus::Wip,
        ProjectStatus::UnderDevelopment,
        ProjectStatus::InternalUat,
        ProjectStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "Open",
            ProjectStatus::Wip => "WIP",
            ProjectStatus::UnderDevelopment => "Under Development",
            ProjectStatus::InternalUat => "Internal UAT",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    /// Accepts the display label in any case, with spaces, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        ProjectStatus::ALL
            .into_iter()
            .find(|status| normalize_label(status.label()) == wanted)
            .ok_or_else(|| format!("unknown project status: {s}"))
    }
}

pub(crate) fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A file attached to a project, stored inline as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    pub data: String,
}

/// Represents a tracked project.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](crate::framework::ResourceActor); see
/// [`crate::project_actor`] for the entity implementation and the deletion policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skillset: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Payload for creating a new project.
#[derive(Debug, Clone, Default)]
pub struct ProjectCreate {
    pub name: String,
    pub description: String,
    pub department: String,
    pub sponsor: Option<String>,
    pub duration_start: Option<NaiveDate>,
    pub duration_end: Option<NaiveDate>,
    pub skillset: Option<String>,
    pub attachments: Vec<Attachment>,
}

/// Payload for editing a project. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub sponsor: Option<Option<String>>,
    pub duration_start: Option<Option<NaiveDate>>,
    pub duration_end: Option<Option<NaiveDate>>,
    pub skillset: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
}
