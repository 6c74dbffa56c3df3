use async_trait::async_trait;
use resource_actor::{ActorEntity, FrameworkError, ResourceActor};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Rider {
    id: u32,
    badge: String,
    shift: Shift,
    deliveries: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Shift {
    Day,
    Night,
}

#[derive(Debug)]
struct RiderCreate {
    badge: String,
    shift: Shift,
}

#[derive(Debug)]
struct RiderUpdate {
    deliveries: u32,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum RiderError {
    #[error("badge already issued: {0}")]
    BadgeTaken(String),
    #[error("deliveries cannot go down")]
    Regression,
}

#[async_trait]
impl ActorEntity for Rider {
    type Id = u32;
    type Create = RiderCreate;
    type Update = RiderUpdate;
    type Query = Option<Shift>;
    type Context = ();
    type Error = RiderError;

    fn from_create_params(id: u32, params: RiderCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            badge: params.badge,
            shift: params.shift,
            deliveries: 0,
        })
    }

    fn conflicts_with(&self, existing: &Self) -> Option<Self::Error> {
        (self.badge == existing.badge).then(|| RiderError::BadgeTaken(self.badge.clone()))
    }

    fn matches(&self, query: &Option<Shift>) -> bool {
        query.map_or(true, |shift| shift == self.shift)
    }

    async fn on_update(&mut self, update: RiderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        // Mutate first, then reject: the actor must still discard the draft.
        let before = self.deliveries;
        self.deliveries = update.deliveries;
        if update.deliveries < before {
            return Err(RiderError::Regression);
        }
        Ok(())
    }
}

fn rider(badge: &str, shift: Shift) -> RiderCreate {
    RiderCreate {
        badge: badge.to_string(),
        shift,
    }
}

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Rider>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(rider("B-1", Shift::Day)).await.unwrap();
    assert_eq!(id, 1);

    let fetched = client.get(id).await.unwrap().unwrap();
    assert_eq!(fetched.deliveries, 0);

    let updated = client.update(id, RiderUpdate { deliveries: 5 }).await.unwrap();
    assert_eq!(updated.deliveries, 5);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_conflicting_create_is_rejected_without_consuming_id() {
    let (actor, client) = ResourceActor::<Rider>::new(10);
    tokio::spawn(actor.run(()));

    client.create(rider("B-7", Shift::Day)).await.unwrap();
    let err = client.create(rider("B-7", Shift::Night)).await.unwrap_err();
    assert_eq!(
        err.downcast_entity::<RiderError>().unwrap(),
        RiderError::BadgeTaken("B-7".into())
    );

    let next = client.create(rider("B-8", Shift::Night)).await.unwrap();
    assert_eq!(next, 2);
}

#[tokio::test]
async fn test_list_filters_by_query() {
    let (actor, client) = ResourceActor::<Rider>::new(10);
    tokio::spawn(actor.run(()));

    client.create(rider("D-1", Shift::Day)).await.unwrap();
    client.create(rider("N-1", Shift::Night)).await.unwrap();
    client.create(rider("D-2", Shift::Day)).await.unwrap();

    let mut day: Vec<String> = client
        .list(Some(Shift::Day))
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.badge)
        .collect();
    day.sort();
    assert_eq!(day, vec!["D-1", "D-2"]);
    assert_eq!(client.list(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_rejected_update_leaves_record_untouched() {
    let (actor, client) = ResourceActor::<Rider>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(rider("B-2", Shift::Day)).await.unwrap();
    client.update(id, RiderUpdate { deliveries: 4 }).await.unwrap();

    let err = client.update(id, RiderUpdate { deliveries: 1 }).await.unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.deliveries, 4);
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let (actor, client) = ResourceActor::<Rider>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.update(42, RiderUpdate { deliveries: 1 }).await.unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));
}
