// =============================================================================
// Filters - narrowing project and task lists
// =============================================================================

use crate::model::{Project, ProjectId, ProjectStatus, Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Filters for the project list. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
    #[serde(default)]
    pub department: Option<String>,

    #[serde(default)]
    pub sponsor: Option<String>,

    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    /// Exact match on every field that is set.
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(ref department) = self.department {
            if &project.department != department {
                return false;
            }
        }
        if let Some(ref sponsor) = self.sponsor {
            if project.sponsor.as_ref() != Some(sponsor) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        true
    }

    /// Matching projects, keeping the input order.
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Filters for the task list. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub project: Option<ProjectId>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    /// Case-insensitive substring of the title or the description.
    #[serde(default)]
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(project) = self.project {
            if task.project_id != project {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !task.title.to_lowercase().contains(&needle)
                && !task.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Distinct non-blank departments, in first-seen order.
pub fn departments(projects: &[Project]) -> Vec<String> {
    distinct(projects.iter().map(|p| p.department.as_str()))
}

/// Distinct non-blank sponsors, in first-seen order.
pub fn sponsors(projects: &[Project]) -> Vec<String> {
    distinct(projects.iter().filter_map(|p| p.sponsor.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;
    use chrono::Utc;

    fn project(name: &str, department: &str, sponsor: Option<&str>, status: ProjectStatus) -> Project {
        Project {
            id: ProjectId::new(),
            name: name.to_string(),
            description: String::new(),
            department: department.to_string(),
            sponsor: sponsor.map(str::to_string),
            duration_start: None,
            duration_end: None,
            skillset: None,
            attachments: Vec::new(),
            status,
        }
    }

    fn task(project_id: ProjectId, title: &str, description: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::new(),
            project_id,
            title: title.to_string(),
            description: description.to_string(),
            estimated_hours: 0.0,
            actual_hours: 0.0,
            status,
            sub_tasks: Vec::new(),
            created: Utc::now(),
        }
    }

    #[test]
    fn default_filters_match_everything() {
        let projects = vec![
            project("a", "IT", None, ProjectStatus::Open),
            project("b", "HR", Some("CFO"), ProjectStatus::Completed),
        ];
        assert_eq!(ProjectFilter::default().apply(&projects).len(), 2);
    }

    #[test]
    fn project_filter_combines_fields() {
        let projects = vec![
            project("a", "IT", Some("CTO"), ProjectStatus::Wip),
            project("b", "IT", Some("CFO"), ProjectStatus::Wip),
            project("c", "IT", Some("CTO"), ProjectStatus::Completed),
            project("d", "HR", Some("CTO"), ProjectStatus::Wip),
        ];
        let filter = ProjectFilter {
            department: Some("IT".into()),
            sponsor: Some("CTO".into()),
            status: Some(ProjectStatus::Wip),
        };
        let names: Vec<&str> = filter.apply(&projects).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn distinct_values_in_first_seen_order() {
        let projects = vec![
            project("a", "IT", Some("CTO"), ProjectStatus::Open),
            project("b", "HR", None, ProjectStatus::Open),
            project("c", "IT", Some("CFO"), ProjectStatus::Open),
            project("d", "", Some("CTO"), ProjectStatus::Open),
        ];
        assert_eq!(departments(&projects), vec!["IT", "HR"]);
        assert_eq!(sponsors(&projects), vec!["CTO", "CFO"]);
    }

    #[test]
    fn task_search_is_case_insensitive_over_title_and_description() {
        let p = ProjectId::new();
        let tasks = vec![
            task(p, "Fix Login", "", TaskStatus::Open),
            task(p, "Docs", "explain LOGIN flow", TaskStatus::Blocked),
            task(p, "Deploy", "", TaskStatus::Open),
            task(ProjectId::new(), "login elsewhere", "", TaskStatus::Open),
        ];
        let filter = TaskFilter {
            project: Some(p),
            status: None,
            search: Some("login".into()),
        };
        let titles: Vec<&str> = filter.apply(&tasks).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Fix Login", "Docs"]);

        let blocked = TaskFilter {
            status: Some(TaskStatus::Blocked),
            ..filter
        };
        assert_eq!(blocked.apply(&tasks).len(), 1);
    }
}
