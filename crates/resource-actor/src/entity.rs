//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored record (User, Driver, Order,
//! Restaurant, MenuItem) implements so that a generic [`ResourceActor`](crate::ResourceActor)
//! can own it. Associated types pin down the id, the create/update payloads, list
//! queries, the injected context, and the error type.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] runs after construction, before the record is stored.
//! - [`ActorEntity::on_delete`] runs before removal.
//! - [`ActorEntity::conflicts_with`] lets a record reject creation when another stored
//!   record already claims the same unique key (e.g. one driver profile per user).
//! - [`ActorEntity::matches`] decides whether a record belongs to a `List` result.
//!
//! Defaults are no-ops, so simple records only implement `from_create_params` and
//! `on_update`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors through clients held in
/// `Context`. The context is handed to `run()`, not `new()`, which lets actors that
/// depend on each other be constructed in any order.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier. Converted from the actor's `u32` sequence.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create a new record.
    type Create: Send + Sync + Debug;

    /// Patch applied to an existing record.
    type Update: Send + Sync + Debug;

    /// Filter accepted by `List` requests. Use `()` when the record has no secondary keys.
    type Query: Send + Sync + Debug;

    /// Runtime dependencies injected into hooks. Use `()` when none are needed.
    type Context: Send + Sync;

    /// Error type surfaced by the hooks.
    ///
    /// One enum per record kind rather than one per message: callers match on a
    /// single `OrderError`, at the cost of some variants being impossible for a
    /// given request.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the record from its freshly allocated id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Returns an error when `self` may not coexist with `existing` (unique keys).
    fn conflicts_with(&self, _existing: &Self) -> Option<Self::Error> {
        None
    }

    /// Whether this record is part of the result set for `query`.
    fn matches(&self, _query: &Self::Query) -> bool {
        true
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the record is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update patch. Returning an error leaves the stored record untouched
    /// as long as the hook validates before mutating.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
