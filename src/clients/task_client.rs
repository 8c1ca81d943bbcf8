//! # Task Client
//!
//! Provides a high‑level API for interacting with the `Task` actor, including the
//! per-project queries the project cascade relies on.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    ProjectId, SubTask, SubTaskCreate, SubTaskId, SubTaskUpdate, Task, TaskCreate, TaskId,
    TaskStatus, TaskUpdate,
};
use crate::task_actor::{TaskAction, TaskActionResult, TaskError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Task actor.
#[derive(Clone)]
pub struct TaskClient {
    inner: ResourceClient<Task>,
}

impl TaskClient {
    pub fn new(inner: ResourceClient<Task>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Task> for TaskClient {
    type Error = TaskError;

    fn inner(&self) -> &ResourceClient<Task> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<TaskError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => TaskError::NotFound(id),
            Err(other) => TaskError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl TaskClient {
    #[instrument(skip(self))]
    pub async fn create_task(&self, params: TaskCreate) -> Result<TaskId, TaskError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_task(&self, id: TaskId, update: TaskUpdate) -> Result<Task, TaskError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// All tasks, newest first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        let mut tasks = self.list().await?;
        tasks.reverse();
        Ok(tasks)
    }

    /// Tasks of one project, newest first.
    pub async fn tasks_for_project(&self, project: ProjectId) -> Result<Vec<Task>, TaskError> {
        let mut tasks = self.list_tasks().await?;
        tasks.retain(|t| t.project_id == project);
        Ok(tasks)
    }

    /// Returns the status the task had before.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: TaskId, status: TaskStatus) -> Result<TaskStatus, TaskError> {
        match self.action(id, TaskAction::SetStatus(status)).await? {
            TaskActionResult::SetStatus(previous) => Ok(previous),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_sub_task(&self, id: TaskId, params: SubTaskCreate) -> Result<SubTaskId, TaskError> {
        match self.action(id, TaskAction::AddSubTask(params)).await? {
            TaskActionResult::AddSubTask(sub_id) => Ok(sub_id),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_sub_task(
        &self,
        id: TaskId,
        sub_task: SubTaskId,
        update: SubTaskUpdate,
    ) -> Result<SubTask, TaskError> {
        let action = TaskAction::UpdateSubTask {
            id: sub_task,
            update,
        };
        match self.action(id, action).await? {
            TaskActionResult::UpdateSubTask(updated) => Ok(updated),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_sub_task(&self, id: TaskId, sub_task: SubTaskId) -> Result<SubTask, TaskError> {
        match self.action(id, TaskAction::RemoveSubTask(sub_task)).await? {
            TaskActionResult::RemoveSubTask(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }

    /// Deletes every task of `project`, returning how many were deleted.
    ///
    /// Tasks that disappear between the scan and the delete are skipped.
    #[instrument(skip(self))]
    pub async fn delete_for_project(&self, project: ProjectId) -> Result<usize, TaskError> {
        let mut deleted = 0;
        for task in self.tasks_for_project(project).await? {
            match self.delete(task.id).await {
                Ok(()) => deleted += 1,
                Err(TaskError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        info!(%project, deleted, "Deleted project tasks");
        Ok(deleted)
    }

    pub async fn clear(&self) -> Result<usize, TaskError> {
        self.inner.clear().await.map_err(Self::map_error)
    }

    async fn action(&self, id: TaskId, action: TaskAction) -> Result<TaskActionResult, TaskError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: TaskActionResult) -> TaskError {
    TaskError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use chrono::{Duration, Utc};

    fn task(project: ProjectId, title: &str, age_minutes: i64) -> Task {
        Task {
            id: TaskId::new(),
            project_id: project,
            title: title.to_string(),
            description: String::new(),
            estimated_hours: 0.0,
            actual_hours: 0.0,
            status: TaskStatus::Open,
            sub_tasks: Vec::new(),
            created: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn test_list_tasks_newest_first() {
        let mut mock = MockClient::<Task>::new();
        let p = ProjectId::new();
        mock.expect_list()
            .return_ok(vec![task(p, "old", 10), task(p, "new", 1)]);

        let client = TaskClient::new(mock.client());
        let titles: Vec<String> = client
            .list_tasks()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["new", "old"]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_delete_for_project_skips_vanished_tasks() {
        let mut mock = MockClient::<Task>::new();
        let p1 = ProjectId::new();
        let mine = task(p1, "mine", 3);
        let gone = task(p1, "gone", 2);
        let other = task(ProjectId::new(), "other", 1);

        mock.expect_list()
            .return_ok(vec![mine.clone(), gone.clone(), other]);
        // Newest first: `gone` is visited before `mine`.
        mock.expect_delete(gone.id)
            .return_err(FrameworkError::NotFound(gone.id.to_string()));
        mock.expect_delete(mine.id).return_ok(());

        let client = TaskClient::new(mock.client());
        assert_eq!(client.delete_for_project(p1).await.unwrap(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_subtask_errors_are_recovered() {
        let mut mock = MockClient::<Task>::new();
        let id = TaskId::new();
        let missing = SubTaskId::new();
        mock.expect_action(id)
            .return_err(FrameworkError::EntityError(Box::new(TaskError::SubTaskNotFound(
                missing.to_string(),
            ))));

        let client = TaskClient::new(mock.client());
        let err = client.remove_sub_task(id, missing).await.unwrap_err();
        assert_eq!(err, TaskError::SubTaskNotFound(missing.to_string()));
        mock.verify();
    }
}
