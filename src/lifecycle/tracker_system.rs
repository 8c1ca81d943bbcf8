use crate::clients::{LedgerClient, ProjectClient, TaskClient};
use crate::config::TrackerConfig;
use crate::project_actor::{ProjectContext, ProjectError};
use crate::resource_actor::ResourceError;
use crate::storage::{FileStore, KeyValueStore, StorageError};
use crate::task_actor::TaskError;
use crate::views::Snapshot;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors surfaced by system-wide operations.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// How many entities [`TrackerSystem::clear_all_data`] removed per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearedCounts {
    pub projects: usize,
    pub tasks: usize,
    pub resources: usize,
}

/// The runtime orchestrator owning the three collections.
///
/// `TrackerSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the Resource, Task and Project actors
/// - **Dependency Wiring**: the Project actor gets the ledger and task clients for
///   its deletion policy
/// - **Persistence**: every actor loads its collection from the same store at start-up
///
/// # Example
///
/// ```ignore
/// let system = TrackerSystem::open(&config)?;
///
/// let qa = system.ledger_client.create_resource(params).await?;
/// system.ledger_client.allocate(qa, project_id, 3).await?;
///
/// system.shutdown().await?;
/// ```
pub struct TrackerSystem {
    /// Client for the resource allocation ledger
    pub ledger_client: LedgerClient,

    /// Client for interacting with the Project actor
    pub project_client: ProjectClient,

    /// Client for interacting with the Task actor
    pub task_client: TaskClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TrackerSystem {
    /// Creates and starts all actors on top of `store`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &TrackerConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors; each loads its collection now.
        let (resource_actor, resource_client) = crate::resource_actor::new(buffer, store.clone());
        let (task_actor, task_client) = crate::task_actor::new(buffer, store.clone());
        let (project_actor, project_client) = crate::project_actor::new(buffer, store);

        let ledger_client = LedgerClient::new(resource_client);
        let task_client = TaskClient::new(task_client);
        let project_client = ProjectClient::new(project_client);

        // 2. Start actors with injected context.
        let resource_handle = tokio::spawn(resource_actor.run(config.ledger));
        let task_handle = tokio::spawn(task_actor.run(()));
        let project_handle = tokio::spawn(project_actor.run(ProjectContext {
            ledger: ledger_client.clone(),
            tasks: task_client.clone(),
            on_delete: config.projects.on_delete,
        }));

        info!(
            on_delete = %config.projects.on_delete,
            enforce_capacity_on_update = config.ledger.enforce_capacity_on_update,
            prune_empty_allocations = config.ledger.prune_empty_allocations,
            "System started"
        );

        Self {
            ledger_client,
            project_client,
            task_client,
            handles: vec![project_handle, task_handle, resource_handle],
        }
    }

    /// Starts the system on a [`FileStore`] rooted at `config.data_dir`.
    pub fn open(config: &TrackerConfig) -> Result<Self, SystemError> {
        let store = FileStore::open(&config.data_dir)?;
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Reads all three collections, each in its display order.
    pub async fn snapshot(&self) -> Result<Snapshot, SystemError> {
        Ok(Snapshot {
            projects: self.project_client.list_projects().await?,
            tasks: self.task_client.list_tasks().await?,
            resources: self.ledger_client.list_resources().await?,
        })
    }

    /// Empties every collection. The project deletion policy is not applied.
    pub async fn clear_all_data(&self) -> Result<ClearedCounts, SystemError> {
        let cleared = ClearedCounts {
            projects: self.project_client.clear().await?,
            tasks: self.task_client.clear().await?,
            resources: self.ledger_client.clear().await?,
        };
        info!(?cleared, "All data cleared");
        Ok(cleared)
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the channels. The Project actor stops first;
    /// it holds the only other ledger and task clients, so the remaining actors
    /// stop once its context is dropped.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.project_client);
        drop(self.task_client);
        drop(self.ledger_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
