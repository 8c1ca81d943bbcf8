use chrono::Utc;
use pm_tracker::clients::{LedgerClient, ProjectClient, TaskClient};
use pm_tracker::framework::{mock::MockClient, ActorClient, FrameworkError};
use pm_tracker::model::{
    Attachment, ProjectCreate, ProjectStatus, ProjectUpdate, Resource, ResourceId, Task, TaskId,
    TaskStatus,
};
use pm_tracker::project_actor::{DeletionPolicy, ProjectContext, ProjectError};
use pm_tracker::resource_actor::ResourceActionResult;
use pm_tracker::storage::MemoryStore;
use std::sync::Arc;

struct Harness {
    ledger_mock: MockClient<Resource>,
    task_mock: MockClient<Task>,
    client: ProjectClient,
}

/// A real Project actor whose ledger and task dependencies are mocks.
fn harness(on_delete: DeletionPolicy) -> Harness {
    let ledger_mock = MockClient::<Resource>::new();
    let task_mock = MockClient::<Task>::new();
    let (actor, client) = pm_tracker::project_actor::new(8, Arc::new(MemoryStore::new()));
    tokio::spawn(actor.run(ProjectContext {
        ledger: LedgerClient::new(ledger_mock.client()),
        tasks: TaskClient::new(task_mock.client()),
        on_delete,
    }));
    Harness {
        ledger_mock,
        task_mock,
        client: ProjectClient::new(client),
    }
}

fn portal() -> ProjectCreate {
    ProjectCreate {
        name: "Portal".to_string(),
        department: "IT".to_string(),
        ..ProjectCreate::default()
    }
}

fn task_for(project_id: pm_tracker::model::ProjectId) -> Task {
    Task {
        id: TaskId::new(),
        project_id,
        title: "Design login".to_string(),
        description: String::new(),
        estimated_hours: 0.0,
        actual_hours: 0.0,
        status: TaskStatus::Open,
        sub_tasks: Vec::new(),
        created: Utc::now(),
    }
}

#[tokio::test]
async fn test_cascade_delete_calls_ledger_and_tasks() {
    let mut h = harness(DeletionPolicy::Cascade);
    let id = h.client.create_project(portal()).await.unwrap();

    let mut qa = Resource::new(ResourceId::new(), "QA Team", 5, None);
    qa.allocated.insert(id, 3);
    let idle = Resource::new(ResourceId::new(), "Ops", 2, None);
    h.ledger_mock.expect_list().return_ok(vec![qa.clone(), idle]);
    h.ledger_mock
        .expect_action(qa.id)
        .return_ok(ResourceActionResult::ReleaseConsumer(3));

    let task = task_for(id);
    h.task_mock.expect_list().return_ok(vec![task.clone()]);
    h.task_mock.expect_delete(task.id).return_ok(());

    h.client.delete_project(id).await.expect("delete");
    assert!(h.client.get(id).await.unwrap().is_none());

    h.ledger_mock.verify();
    h.task_mock.verify();
}

#[tokio::test]
async fn test_failed_cascade_keeps_project() {
    let mut h = harness(DeletionPolicy::Cascade);
    let id = h.client.create_project(portal()).await.unwrap();

    h.ledger_mock
        .expect_list()
        .return_err(FrameworkError::ActorClosed);

    let result = h.client.delete_project(id).await;
    assert!(matches!(result, Err(ProjectError::CascadeFailed(_))));
    assert!(h.client.get(id).await.unwrap().is_some());

    h.ledger_mock.verify();
    h.task_mock.verify();
}

#[tokio::test]
async fn test_orphan_delete_touches_nothing() {
    let h = harness(DeletionPolicy::Orphan);
    let id = h.client.create_project(portal()).await.unwrap();

    h.client.delete_project(id).await.expect("delete");
    assert!(h.client.list_projects().await.unwrap().is_empty());

    h.ledger_mock.verify();
    h.task_mock.verify();
}

#[tokio::test]
async fn test_update_is_all_or_nothing() {
    let h = harness(DeletionPolicy::Cascade);
    let id = h.client.create_project(portal()).await.unwrap();

    let bad = ProjectUpdate {
        name: Some("Portal v2".to_string()),
        department: Some("  ".to_string()),
        ..ProjectUpdate::default()
    };
    assert_eq!(
        h.client.update_project(id, bad).await,
        Err(ProjectError::ValidationError("Department is required".into()))
    );
    let stored = h.client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Portal");

    let good = ProjectUpdate {
        sponsor: Some(Some("CFO".to_string())),
        status: Some(ProjectStatus::Wip),
        ..ProjectUpdate::default()
    };
    let updated = h.client.update_project(id, good).await.unwrap();
    assert_eq!(updated.sponsor.as_deref(), Some("CFO"));
    assert_eq!(updated.status, ProjectStatus::Wip);
}

#[tokio::test]
async fn test_attachments() {
    let h = harness(DeletionPolicy::Cascade);
    let id = h.client.create_project(portal()).await.unwrap();

    let brief = Attachment {
        name: "brief.txt".to_string(),
        mime_type: "text/plain".to_string(),
        data: "data:text/plain;base64,aGVsbG8=".to_string(),
    };
    assert_eq!(h.client.add_attachment(id, brief.clone()).await.unwrap(), 1);
    assert_eq!(
        h.client.remove_attachment(id, 4).await,
        Err(ProjectError::AttachmentNotFound(4))
    );
    assert_eq!(h.client.remove_attachment(id, 0).await.unwrap(), brief);
    assert!(h.client.get(id).await.unwrap().unwrap().attachments.is_empty());
}

#[tokio::test]
async fn test_projects_list_newest_first() {
    let h = harness(DeletionPolicy::Cascade);
    let first = h.client.create_project(portal()).await.unwrap();
    let second = h
        .client
        .create_project(ProjectCreate {
            name: "Billing".to_string(),
            department: "Finance".to_string(),
            ..ProjectCreate::default()
        })
        .await
        .unwrap();

    let ids: Vec<_> = h
        .client
        .list_projects()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![second, first]);
}
