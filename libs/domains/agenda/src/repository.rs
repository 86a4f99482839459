use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::AgendaResult;
use crate::models::{DeleteResult, Event, EventPatch, InsertResult, NewEvent, UpdateResult};
use crate::query::EventQuery;

/// Repository trait for agenda event persistence
///
/// Finding nothing is not an error: missing ids give empty lists and zero counts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Run a listing query
    async fn find(&self, query: EventQuery) -> AgendaResult<Vec<Event>>;

    /// Insert a new event; the store assigns its id
    async fn insert(&self, event: NewEvent) -> AgendaResult<InsertResult>;

    /// Apply `patch` with `$set` to the event `id`
    async fn update(&self, id: ObjectId, patch: EventPatch) -> AgendaResult<UpdateResult>;

    /// Delete the event `id`
    async fn delete(&self, id: ObjectId) -> AgendaResult<DeleteResult>;
}
