use super::Snapshot;
use crate::model::{ResourceId, TaskStatus};
use serde::Serialize;

/// Label used for projects without a department.
pub const NO_DEPARTMENT: &str = "N/A";

/// Capacity figures of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceUtilisation {
    pub id: ResourceId,
    pub name: String,
    pub total: u32,
    pub allocated: u64,
    pub available: i64,
}

/// Aggregate figures over a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub project_count: usize,
    pub task_count: usize,
    pub resource_count: usize,
    /// Every task status, in workflow order, including zero counts.
    pub tasks_by_status: Vec<(TaskStatus, usize)>,
    /// Departments in first-seen order.
    pub projects_by_department: Vec<(String, usize)>,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub utilisation: Vec<ResourceUtilisation>,
}

impl DashboardSummary {
    pub fn build(snapshot: &Snapshot) -> Self {
        let tasks_by_status = TaskStatus::ALL
            .into_iter()
            .map(|status| {
                let count = snapshot.tasks.iter().filter(|t| t.status == status).count();
                (status, count)
            })
            .collect();

        let mut projects_by_department: Vec<(String, usize)> = Vec::new();
        for project in &snapshot.projects {
            let department = match project.department.trim() {
                "" => NO_DEPARTMENT,
                department => department,
            };
            match projects_by_department.iter_mut().find(|(d, _)| d == department) {
                Some((_, count)) => *count += 1,
                None => projects_by_department.push((department.to_string(), 1)),
            }
        }

        let utilisation = snapshot
            .resources
            .iter()
            .map(|r| ResourceUtilisation {
                id: r.id,
                name: r.name.clone(),
                total: r.total,
                allocated: r.allocated_units(),
                available: r.available_units(),
            })
            .collect();

        Self {
            project_count: snapshot.projects.len(),
            task_count: snapshot.tasks.len(),
            resource_count: snapshot.resources.len(),
            tasks_by_status,
            projects_by_department,
            estimated_hours: snapshot.tasks.iter().map(|t| t.estimated_hours).sum(),
            actual_hours: snapshot.tasks.iter().map(|t| t.actual_hours).sum(),
            utilisation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, ProjectId, ProjectStatus, Resource, Task, TaskId};
    use chrono::Utc;

    fn project(department: &str) -> Project {
        Project {
            id: ProjectId::new(),
            name: "p".into(),
            description: String::new(),
            department: department.into(),
            sponsor: None,
            duration_start: None,
            duration_end: None,
            skillset: None,
            attachments: Vec::new(),
            status: ProjectStatus::Open,
        }
    }

    fn task(status: TaskStatus, estimated: f64, actual: f64) -> Task {
        Task {
            id: TaskId::new(),
            project_id: ProjectId::new(),
            title: "t".into(),
            description: String::new(),
            estimated_hours: estimated,
            actual_hours: actual,
            status,
            sub_tasks: Vec::new(),
            created: Utc::now(),
        }
    }

    #[test]
    fn empty_snapshot() {
        let summary = DashboardSummary::build(&Snapshot::default());
        assert_eq!(summary.project_count, 0);
        assert_eq!(summary.tasks_by_status.len(), TaskStatus::ALL.len());
        assert!(summary.tasks_by_status.iter().all(|(_, n)| *n == 0));
        assert!(summary.projects_by_department.is_empty());
    }

    #[test]
    fn counts_and_groups() {
        let p1 = ProjectId::new();
        let mut qa = Resource::new(ResourceId::new(), "QA Team", 5, None);
        qa.allocated.insert(p1, 3);

        let snapshot = Snapshot {
            projects: vec![project("IT"), project(""), project("HR"), project("IT")],
            tasks: vec![
                task(TaskStatus::Open, 2.0, 1.0),
                task(TaskStatus::Blocked, 3.5, 0.0),
                task(TaskStatus::Open, 0.5, 0.5),
            ],
            resources: vec![qa.clone()],
        };
        let summary = DashboardSummary::build(&snapshot);

        assert_eq!(summary.project_count, 4);
        assert_eq!(summary.task_count, 3);
        assert_eq!(summary.resource_count, 1);
        assert_eq!(
            summary.tasks_by_status,
            vec![
                (TaskStatus::Open, 2),
                (TaskStatus::InProgress, 0),
                (TaskStatus::Blocked, 1),
                (TaskStatus::Completed, 0),
            ]
        );
        assert_eq!(
            summary.projects_by_department,
            vec![("IT".to_string(), 2), ("N/A".to_string(), 1), ("HR".to_string(), 1)]
        );
        assert_eq!(summary.estimated_hours, 6.0);
        assert_eq!(summary.actual_hours, 1.5);
        assert_eq!(
            summary.utilisation,
            vec![ResourceUtilisation {
                id: qa.id,
                name: "QA Team".into(),
                total: 5,
                allocated: 3,
                available: 2,
            }]
        );
    }
}
