//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns one typed
//! collection. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive access to the entity store.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use crate::storage::KeyValueStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Where an actor writes its collection after each mutation.
struct Persistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each actor processes its own messages *sequentially* in a loop, so no `Mutex`
/// or `RwLock` guards the `store`, and every operation runs to completion before
/// the next one starts.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` (or `with_storage()`) to get the
///     `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// # Operations
///
/// * **Create**: generates a new ID, calls `T::from_create_params`, then `on_create`,
///   inserts, persists, returns the ID.
/// * **Get / List**: clones from the `store`; `List` keeps insertion order.
/// * **Update / Action**: applies the hook to a *copy* of the entity and commits the
///   copy only if the hook succeeds, so a rejected operation changes nothing.
/// * **Delete**: calls `on_delete`, then removes and persists.
/// * **Clear**: drops every entity and persists the empty collection.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    persistence: Option<Persistence>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an in-memory `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client wait until there is space.
    /// * `next_id_fn` - Generates the ID of each created entity.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            persistence: None,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Creates a `ResourceActor` backed by `store` under `key`.
    ///
    /// The collection is loaded immediately. A missing key yields an empty
    /// collection; so does an unreadable value, which is logged and later
    /// overwritten by the first successful mutation.
    pub fn with_storage(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> (Self, ResourceClient<T>) {
        let key = key.into();
        let (mut actor, client) = Self::new(buffer_size, next_id_fn);
        for item in load_collection::<T>(store.as_ref(), &key) {
            let id = item.id().clone();
            if actor.store.insert(id.clone(), item).is_none() {
                actor.order.push(id);
            }
        }
        info!(
            entity_type = entity_type::<T>(),
            key = %key,
            size = actor.store.len(),
            "Loaded"
        );
        actor.persistence = Some(Persistence { store, key });
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows
    /// entities to reach dependencies (like other clients) that were created
    /// *after* the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = entity_type::<T>();
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            self.order.push(id.clone());
                            self.persist(entity_type);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = current.clone();
                    if let Err(e) = draft.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), draft.clone());
                    self.persist(entity_type);
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(draft));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    self.order.retain(|existing| existing != &id);
                    self.persist(entity_type);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mutation = T::is_mutation(&action);
                    let mut draft = current.clone();
                    match draft.handle_action(action, &context).await {
                        Ok(result) => {
                            if mutation {
                                self.store.insert(id.clone(), draft);
                                self.persist(entity_type);
                            }
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Clear { respond_to } => {
                    let removed = self.store.len();
                    self.store.clear();
                    self.order.clear();
                    self.persist(entity_type);
                    info!(entity_type, removed, "Cleared");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// The collection in insertion order.
    fn snapshot(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.store.get(id).cloned())
            .collect()
    }

    /// Writes the whole collection. Failures are logged, never returned: the
    /// in-memory state stays authoritative for the rest of the session.
    fn persist(&self, entity_type: &str) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        let items: Vec<&T> = self
            .order
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect();
        let value = match serde_json::to_value(&items) {
            Ok(value) => value,
            Err(e) => {
                warn!(entity_type, key = %persistence.key, error = %e, "Encode failed");
                return;
            }
        };
        match persistence.store.set(&persistence.key, &value) {
            Ok(()) => debug!(entity_type, key = %persistence.key, size = items.len(), "Persisted"),
            Err(e) => warn!(entity_type, key = %persistence.key, error = %e, "Persist failed"),
        }
    }
}

fn load_collection<T: ActorEntity>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let entity_type = entity_type::<T>();
    match store.get(key) {
        Ok(None) => Vec::new(),
        Ok(Some(value)) => match serde_json::from_value::<Vec<T>>(value) {
            Ok(items) => items,
            Err(e) => {
                warn!(entity_type, key, error = %e, "Stored collection has the wrong shape, starting empty");
                Vec::new()
            }
        },
        Err(e) => {
            warn!(entity_type, key, error = %e, "Stored collection unreadable, starting empty");
            Vec::new()
        }
    }
}

/// Short type name for log fields (e.g. "Resource" instead of "pm_tracker::model::resource::Resource").
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
