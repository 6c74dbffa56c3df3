//! # Generic Actor Server
//!
//! `ResourceActor` owns the in-memory store for one record kind and processes
//! requests strictly one at a time. A single record's read-modify-write inside a
//! hook is therefore atomic with respect to every other request on the same actor.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// This is the server half: it owns the `store` and the receiving end of the
/// channel. There is no `Mutex` around the store; exclusive ownership inside the
/// task is what keeps it consistent.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// # Operations
///
/// * **Create** builds the record under the next `u32` id, checks
///   [`ActorEntity::conflicts_with`] against every stored record, runs `on_create`,
///   then stores it. A rejected create does not consume the id.
/// * **Get** returns a clone, or `None`.
/// * **List** returns clones of every record where [`ActorEntity::matches`] holds.
///   Order is unspecified.
/// * **Update** runs `on_update` against a copy and commits the copy only when the
///   hook succeeds, so a rejected patch never leaves a half-applied record.
/// * **Delete** runs `on_delete`, then removes the record.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

fn rejected<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the channel capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Order" rather than "food_dispatch::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let record = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                ResourceRequest::List { query, respond_to } => {
                    let records: Vec<T> = self
                        .store
                        .values()
                        .filter(|record| record.matches(&query))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, count = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete rejected"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T::Id, FrameworkError> {
        let id = T::Id::from(self.next_id);
        let mut record = T::from_create_params(id.clone(), params).map_err(rejected)?;
        if let Some(conflict) = self.store.values().find_map(|other| record.conflicts_with(other)) {
            return Err(rejected(conflict));
        }
        record.on_create(context).await.map_err(rejected)?;

        self.next_id += 1;
        self.store.insert(id.clone(), record);
        Ok(id)
    }

    async fn update(&mut self, id: &T::Id, update: T::Update, context: &T::Context) -> Result<T, FrameworkError> {
        let mut draft = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        draft.on_update(update, context).await.map_err(rejected)?;
        self.store.insert(id.clone(), draft.clone());
        Ok(draft)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        record.on_delete(context).await.map_err(rejected)?;
        self.store.remove(id);
        Ok(())
    }
}
