//! # Mock Clients
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. Use it to test code that
//! sits *around* a client (the dispatch engine, typed client wrappers) without
//! spawning the real store.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | State | None, scripted replies | Real store |
//! | Error injection | `return_err` | Needs specific state |
//! | Use case | Logic around the client | The actor or the whole system |
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (wrong kind or wrong id) is recorded as unexpected, its caller receives
//! [`FrameworkError::ActorDropped`], and [`MockClient::verify`] panics.
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Driver { id: u32 }
//! #[derive(Debug)] struct DriverCreate;
//! #[derive(Debug)] struct DriverUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("driver")] struct DriverError;
//!
//! #[async_trait]
//! impl ActorEntity for Driver {
//!     type Id = u32; type Create = DriverCreate; type Update = DriverUpdate;
//!     type Query = (); type Context = (); type Error = DriverError;
//!     fn from_create_params(id: u32, _: DriverCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: DriverUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Driver>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// State shared between the mock handle and its serving task.
struct Ledger<T: ActorEntity> {
    expectations: Queue<T>,
    unexpected: Mutex<Vec<String>>,
    updates: Mutex<Vec<T::Update>>,
}

/// A scripted client with expectation tracking.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    ledger: Arc<Ledger<T>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { params, .. } => format!("Create({:?})", params),
        ResourceRequest::Get { id, .. } => format!("Get({})", id),
        ResourceRequest::List { query, .. } => format!("List({:?})", query),
        ResourceRequest::Update { id, update, .. } => format!("Update({}, {:?})", id, update),
        ResourceRequest::Delete { id, .. } => format!("Delete({})", id),
    }
}

fn reply<R>(respond_to: oneshot::Sender<Result<R, FrameworkError>>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

impl<T: ActorEntity> Ledger<T> {
    /// Answers `request` from `next`, or records it as unexpected. An unanswered
    /// request has its responder dropped, which the caller sees as `ActorDropped`.
    fn serve(&self, request: ResourceRequest<T>, next: Option<Expectation<T>>) {
        let seen = describe(&request);
        match (request, next) {
            (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) if id == want => {
                reply(respond_to, response)
            }
            (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                reply(respond_to, response)
            }
            (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                reply(respond_to, response)
            }
            (ResourceRequest::Update { id, update, respond_to }, Some(Expectation::Update { id: want, response }))
                if id == want =>
            {
                self.updates.lock().unwrap().push(update);
                reply(respond_to, response)
            }
            (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response }))
                if id == want =>
            {
                reply(respond_to, response)
            }
            _ => self.unexpected.lock().unwrap().push(seen),
        }
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let ledger = Arc::new(Ledger {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            unexpected: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        });

        let serving = ledger.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = serving.expectations.lock().unwrap().pop_front();
                serving.serve(request, next);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            ledger,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.ledger.expectations, move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(&self.ledger.expectations, |response| Expectation::Create { response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.ledger.expectations, |response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.ledger.expectations, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.ledger.expectations, move |response| Expectation::Delete { id, response })
    }

    /// Update payloads received so far, oldest first.
    pub fn take_updates(&self) -> Vec<T::Update> {
        std::mem::take(&mut *self.ledger.updates.lock().unwrap())
    }

    /// Panics unless every expectation was consumed and nothing unexpected arrived.
    pub fn verify(&self) {
        let misses = self.ledger.unexpected.lock().unwrap();
        if !misses.is_empty() {
            panic!("Unexpected requests: {:?}", *misses);
        }
        let remaining = self.ledger.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: &Queue<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            build: Box::new(build),
        }
    }

    /// Answer the request with `value`.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer the request with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.build)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client plus the raw receiver, for tests that want to inspect each
/// request and answer it by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message as a Get request, or `None`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message as a List request, or `None`.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Query, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Next message as an Update request, or `None`.
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

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Courier {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct CourierCreate {
        name: String,
    }

    #[derive(Debug, PartialEq)]
    struct CourierUpdate {
        name: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("courier error")]
    struct CourierError;

    #[async_trait]
    impl ActorEntity for Courier {
        type Id = u32;
        type Create = CourierCreate;
        type Update = CourierUpdate;
        type Query = ();
        type Context = ();
        type Error = CourierError;

        fn from_create_params(id: u32, params: CourierCreate) -> Result<Self, Self::Error> {
            Ok(Self { id, name: params.name })
        }

        async fn on_update(&mut self, update: CourierUpdate, _ctx: &()) -> Result<(), Self::Error> {
            self.name = update.name;
            Ok(())
        }
    }

    fn courier(id: u32, name: &str) -> Courier {
        Courier {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_channel_helpers() {
        let (client, mut receiver) = create_mock_client::<Courier>(10);

        let task = tokio::spawn(async move { client.get(3).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 3);
        responder.send(Ok(Some(courier(3, "Ravi")))).unwrap();

        let fetched = task.await.unwrap().unwrap();
        assert_eq!(fetched, Some(courier(3, "Ravi")));
    }

    #[tokio::test]
    async fn test_expectations_are_served_in_order() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_create().return_ok(1);
        mock.expect_list().return_ok(vec![courier(1, "Asha")]);
        mock.expect_update(1).return_ok(courier(1, "Asha K"));
        mock.expect_delete(1).return_ok(());

        let client = mock.client();
        let id = client.create(CourierCreate { name: "Asha".into() }).await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.list(()).await.unwrap().len(), 1);
        let updated = client
            .update(1, CourierUpdate { name: "Asha K".into() })
            .await
            .unwrap();
        assert_eq!(updated.name, "Asha K");
        client.delete(1).await.unwrap();

        assert_eq!(mock.take_updates(), vec![CourierUpdate { name: "Asha K".into() }]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_reported() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        let verdict = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verdict.is_err());
    }
}
