//! # Mock Framework
//!
//! Utilities for testing clients in isolation, without spawning real actors.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Determinism** | Fully scripted | Real state management |
//! | **Use Case** | Logic *around* the client (e.g. cascade deletes) | The entity itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Requires building the failing state |
//!
//! Two styles are available:
//!
//! - [`MockClient`]: queue expectations with `expect_*()` builders, hand out
//!   `client()`, then `verify()` that every expectation was consumed.
//! - [`create_mock_client`] with [`expect_create`] / [`expect_get`] /
//!   [`expect_action`]: receive raw requests and answer them by hand, useful to
//!   assert on payloads.

use super::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// An expected request and the scripted reply.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Delete {
        response: Result<(), FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<(Option<<T as ActorEntity>::Id>, Expectation<T>)>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request whose kind or target ID does not
/// match the next expectation panics the background task, which surfaces in the
/// test as `ActorDropped` and an unmet `verify()`.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Resource>::new();
/// mock.expect_list().return_ok(vec![resource]);
/// mock.expect_action(resource_id).return_ok(ResourceActionResult::ReleaseConsumer(3));
///
/// let client = LedgerClient::new(mock.client());
/// // Use client in tests...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("mock queue poisoned").pop_front();
                let Some((expected_id, expectation)) = next else {
                    panic!("Unexpected request: no expectations left");
                };

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Expectation::Get { response }) => {
                        assert_id(expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Expectation::List { response }) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Expectation::Create { response }) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Expectation::Update { response }) => {
                        assert_id(expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Expectation::Delete { response }) => {
                        assert_id(expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Expectation::Action { response }) => {
                        assert_id(expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Some(id), |response| Expectation::Get { response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(None, |response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(None, |response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), |response| Expectation::Update { response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), |response| Expectation::Delete { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Some(id), |response| Expectation::Action { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().expect("mock queue poisoned").len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn assert_id<Id: PartialEq + std::fmt::Debug>(expected: Option<Id>, actual: &Id) {
    if let Some(expected) = expected {
        assert_eq!(&expected, actual, "request targeted an unexpected id");
    }
}

/// Scripts the reply for one queued expectation.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        self.expectations
            .lock()
            .expect("mock queue poisoned")
            .push_back((self.id, (self.wrap)(response)));
    }
}

// =============================================================================
// RAW REQUEST HELPERS
// =============================================================================

/// Creates a client wired to a receiver the test controls.
///
/// Inspect the messages arriving on `receiver` and answer them, simulating the
/// actor's behavior (success, failure) deterministically.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Resource, ResourceCreate, ResourceId};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Resource>(10);
        let id = ResourceId::new();

        let create_task = tokio::spawn(async move {
            let params = ResourceCreate {
                name: "QA Team".to_string(),
                total: 5,
                skillset: None,
            };
            client.create(params).await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "QA Team");
        assert_eq!(payload.total, 5);
        responder.send(Ok(id)).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result.unwrap(), id);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Resource>::new();
        let id = ResourceId::new();

        mock.expect_create().return_ok(id);
        mock.expect_get(id)
            .return_ok(Some(Resource::new(id, "QA Team", 5, None)));
        mock.expect_list().return_ok(vec![]);

        let client = mock.client();

        let created = client
            .create(ResourceCreate {
                name: "QA Team".to_string(),
                total: 5,
                skillset: None,
            })
            .await
            .unwrap();
        assert_eq!(created, id);

        let fetched = client.get(id).await.unwrap();
        assert_eq!(fetched.unwrap().total, 5);
        assert!(client.list().await.unwrap().is_empty());

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_scripted_error() {
        let mut mock = MockClient::<Resource>::new();
        let id = ResourceId::new();
        mock.expect_delete(id)
            .return_err(FrameworkError::NotFound(id.to_string()));

        let result = mock.client().delete(id).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(_))));
        mock.verify();
    }
}
