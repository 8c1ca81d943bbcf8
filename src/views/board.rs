use crate::model::{Project, ProjectStatus};
use serde::Serialize;

/// One board column.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn<'a> {
    pub status: ProjectStatus,
    pub projects: Vec<&'a Project>,
}

/// Projects grouped by status, one column per [`ProjectStatus`] in workflow order.
///
/// Empty columns are kept so the board always has the same shape.
#[derive(Debug, Clone, Serialize)]
pub struct StatusBoard<'a> {
    pub columns: Vec<BoardColumn<'a>>,
}

impl<'a> StatusBoard<'a> {
    pub fn build(projects: &'a [Project]) -> Self {
        let columns = ProjectStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                projects: projects.iter().filter(|p| p.status == status).collect(),
            })
            .collect();
        Self { columns }
    }

    pub fn column(&self, status: ProjectStatus) -> Option<&BoardColumn<'a>> {
        self.columns.iter().find(|c| c.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectCreate, ProjectId};
    use crate::framework::ActorEntity;

    fn project(name: &str, status: ProjectStatus) -> Project {
        let mut p = Project::from_create_params(
            ProjectId::new(),
            ProjectCreate {
                name: name.into(),
                department: "IT".into(),
                ..ProjectCreate::default()
            },
        )
        .unwrap();
        p.status = status;
        p
    }

    #[test]
    fn board_has_every_column_in_order() {
        let projects = vec![
            project("a", ProjectStatus::Completed),
            project("b", ProjectStatus::Open),
            project("c", ProjectStatus::Completed),
        ];
        let board = StatusBoard::build(&projects);

        let statuses: Vec<ProjectStatus> = board.columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, ProjectStatus::ALL.to_vec());

        let done: Vec<&str> = board
            .column(ProjectStatus::Completed)
            .unwrap()
            .projects
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(done, vec!["a", "c"]);
        assert!(board.column(ProjectStatus::Wip).unwrap().projects.is_empty());
    }
}
