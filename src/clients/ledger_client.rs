//! # Ledger Client
//!
//! Provides a high‑level API for interacting with the `Resource` actor.
//! It wraps a `ResourceClient<Resource>` and exposes the allocation ledger
//! operations with typed results and [`ResourceError`]s.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{ProjectId, Resource, ResourceCreate, ResourceId, ResourceUpdate};
use crate::resource_actor::{ResourceAction, ResourceActionResult, ResourceError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Resource actor.
#[derive(Clone)]
pub struct LedgerClient {
    inner: ResourceClient<Resource>,
}

impl LedgerClient {
    pub fn new(inner: ResourceClient<Resource>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Resource> for LedgerClient {
    type Error = ResourceError;

    fn inner(&self) -> &ResourceClient<Resource> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ResourceError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ResourceError::NotFound(id),
            Err(other) => ResourceError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl LedgerClient {
    #[instrument(skip(self))]
    pub async fn create_resource(&self, params: ResourceCreate) -> Result<ResourceId, ResourceError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_resource(
        &self,
        id: ResourceId,
        update: ResourceUpdate,
    ) -> Result<Resource, ResourceError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_resource(&self, id: ResourceId) -> Result<(), ResourceError> {
        self.delete(id).await
    }

    /// All resources, oldest first.
    pub async fn list_resources(&self) -> Result<Vec<Resource>, ResourceError> {
        self.list().await
    }

    /// Allocates `amount` units to `consumer`, returning what it now holds.
    #[instrument(skip(self))]
    pub async fn allocate(
        &self,
        id: ResourceId,
        consumer: ProjectId,
        amount: u32,
    ) -> Result<u32, ResourceError> {
        debug!("Allocating");
        match self.action(id, ResourceAction::Allocate { consumer, amount }).await? {
            ResourceActionResult::Allocate(held) => Ok(held),
            other => Err(unexpected(other)),
        }
    }

    /// Returns `amount` units from `consumer`, returning what it still holds.
    #[instrument(skip(self))]
    pub async fn deallocate(
        &self,
        id: ResourceId,
        consumer: ProjectId,
        amount: u32,
    ) -> Result<u32, ResourceError> {
        debug!("Deallocating");
        match self.action(id, ResourceAction::Deallocate { consumer, amount }).await? {
            ResourceActionResult::Deallocate(held) => Ok(held),
            other => Err(unexpected(other)),
        }
    }

    /// `total - sum(allocated)` for one resource. Negative when over-committed.
    #[instrument(skip(self))]
    pub async fn available_units(&self, id: ResourceId) -> Result<i64, ResourceError> {
        match self.action(id, ResourceAction::CheckAvailable).await? {
            ResourceActionResult::CheckAvailable(units) => Ok(units),
            other => Err(unexpected(other)),
        }
    }

    /// Drops `consumer`'s allocation from every resource that holds one.
    ///
    /// Returns the number of units released. A resource deleted between the scan
    /// and the release is skipped.
    #[instrument(skip(self))]
    pub async fn release_consumer(&self, consumer: ProjectId) -> Result<u32, ResourceError> {
        let holders: Vec<ResourceId> = self
            .list()
            .await?
            .into_iter()
            .filter(|r| r.allocated.contains_key(&consumer))
            .map(|r| r.id)
            .collect();

        let mut released = 0;
        for id in holders {
            match self.action(id, ResourceAction::ReleaseConsumer(consumer)).await {
                Ok(ResourceActionResult::ReleaseConsumer(units)) => released += units,
                Ok(other) => return Err(unexpected(other)),
                Err(ResourceError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        info!(%consumer, released, "Released consumer");
        Ok(released)
    }

    /// Removes every resource, returning how many were removed.
    pub async fn clear(&self) -> Result<usize, ResourceError> {
        self.inner.clear().await.map_err(Self::map_error)
    }

    async fn action(
        &self,
        id: ResourceId,
        action: ResourceAction,
    ) -> Result<ResourceActionResult, ResourceError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: ResourceActionResult) -> ResourceError {
    ResourceError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_allocate_returns_held_units() {
        let (client, mut receiver) = create_mock_client::<Resource>(10);
        let ledger = LedgerClient::new(client);
        let rid = ResourceId::new();
        let p1 = ProjectId::new();

        let task = tokio::spawn(async move { ledger.allocate(rid, p1, 3).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, rid);
        assert_eq!(action, ResourceAction::Allocate { consumer: p1, amount: 3 });
        responder.send(Ok(ResourceActionResult::Allocate(3))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_entity_errors_are_recovered() {
        let (client, mut receiver) = create_mock_client::<Resource>(10);
        let ledger = LedgerClient::new(client);
        let rid = ResourceId::new();

        let task = tokio::spawn(async move { ledger.allocate(rid, ProjectId::new(), 9).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ResourceError::CapacityExceeded { requested: 9, available: 2 },
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            ResourceError::CapacityExceeded { requested: 9, available: 2 }
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_to_domain_error() {
        let mut mock = MockClient::<Resource>::new();
        let rid = ResourceId::new();
        mock.expect_action(rid)
            .return_err(FrameworkError::NotFound(rid.to_string()));

        let ledger = LedgerClient::new(mock.client());
        let err = ledger.available_units(rid).await.unwrap_err();
        assert_eq!(err, ResourceError::NotFound(rid.to_string()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_release_consumer_only_touches_holders() {
        let mut mock = MockClient::<Resource>::new();
        let p1 = ProjectId::new();

        let mut holder = Resource::new(ResourceId::new(), "QA Team", 5, None);
        holder.allocated.insert(p1, 3);
        let mut vanished = Resource::new(ResourceId::new(), "Design", 2, None);
        vanished.allocated.insert(p1, 1);
        let bystander = Resource::new(ResourceId::new(), "Ops", 4, None);

        mock.expect_list()
            .return_ok(vec![holder.clone(), bystander, vanished.clone()]);
        mock.expect_action(holder.id)
            .return_ok(ResourceActionResult::ReleaseConsumer(3));
        mock.expect_action(vanished.id)
            .return_err(FrameworkError::NotFound(vanished.id.to_string()));

        let ledger = LedgerClient::new(mock.client());
        assert_eq!(ledger.release_consumer(p1).await.unwrap(), 3);
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Resource>(1);
        drop(receiver);
        let ledger = LedgerClient::new(client);

        let err = ledger.list_resources().await.unwrap_err();
        assert!(matches!(err, ResourceError::ActorCommunicationError(_)));
    }
}
