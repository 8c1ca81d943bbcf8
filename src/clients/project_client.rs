//! # Project Client
//!
//! Provides a high‑level API for interacting with the `Project` actor.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Attachment, Project, ProjectCreate, ProjectId, ProjectStatus, ProjectUpdate};
use crate::project_actor::{ProjectAction, ProjectActionResult, ProjectError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Project actor.
#[derive(Clone)]
pub struct ProjectClient {
    inner: ResourceClient<Project>,
}

impl ProjectClient {
    pub fn new(inner: ResourceClient<Project>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Project> for ProjectClient {
    type Error = ProjectError;

    fn inner(&self) -> &ResourceClient<Project> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ProjectError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ProjectError::NotFound(id),
            Err(other) => ProjectError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProjectClient {
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_project(&self, params: ProjectCreate) -> Result<ProjectId, ProjectError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_project(
        &self,
        id: ProjectId,
        update: ProjectUpdate,
    ) -> Result<Project, ProjectError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Deletes the project, applying the actor's deletion policy first.
    pub async fn delete_project(&self, id: ProjectId) -> Result<(), ProjectError> {
        self.delete(id).await
    }

    /// All projects, newest first.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ProjectError> {
        let mut projects = self.list().await?;
        projects.reverse();
        Ok(projects)
    }

    /// Returns the status the project had before.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: ProjectId,
        status: ProjectStatus,
    ) -> Result<ProjectStatus, ProjectError> {
        match self.action(id, ProjectAction::SetStatus(status)).await? {
            ProjectActionResult::SetStatus(previous) => Ok(previous),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the number of attachments after the addition.
    #[instrument(skip(self, attachment), fields(attachment = %attachment.name))]
    pub async fn add_attachment(
        &self,
        id: ProjectId,
        attachment: Attachment,
    ) -> Result<usize, ProjectError> {
        match self.action(id, ProjectAction::AddAttachment(attachment)).await? {
            ProjectActionResult::AddAttachment(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_attachment(
        &self,
        id: ProjectId,
        index: usize,
    ) -> Result<Attachment, ProjectError> {
        match self.action(id, ProjectAction::RemoveAttachment(index)).await? {
            ProjectActionResult::RemoveAttachment(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }

    /// Removes every project without applying the deletion policy.
    pub async fn clear(&self) -> Result<usize, ProjectError> {
        self.inner.clear().await.map_err(Self::map_error)
    }

    async fn action(
        &self,
        id: ProjectId,
        action: ProjectAction,
    ) -> Result<ProjectActionResult, ProjectError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: ProjectActionResult) -> ProjectError {
    ProjectError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_set_status_sends_action() {
        let (client, mut receiver) = create_mock_client::<Project>(10);
        let projects = ProjectClient::new(client);
        let pid = ProjectId::new();

        let task =
            tokio::spawn(async move { projects.set_status(pid, ProjectStatus::InternalUat).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, pid);
        assert_eq!(action, ProjectAction::SetStatus(ProjectStatus::InternalUat));
        responder
            .send(Ok(ProjectActionResult::SetStatus(ProjectStatus::Wip)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), ProjectStatus::Wip);
    }

    #[tokio::test]
    async fn test_cascade_failure_reaches_caller() {
        let mut mock = MockClient::<Project>::new();
        let pid = ProjectId::new();
        mock.expect_delete(pid)
            .return_err(FrameworkError::EntityError(Box::new(ProjectError::CascadeFailed(
                "ledger offline".into(),
            ))));

        let projects = ProjectClient::new(mock.client());
        assert_eq!(
            projects.delete_project(pid).await.unwrap_err(),
            ProjectError::CascadeFailed("ledger offline".into())
        );
        mock.verify();
    }
}
