//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use database::mongodb::LazyDatabase;
use futures_util::TryStreamExt;
use mongodb::{
    Collection,
    bson::{doc, oid::ObjectId},
    options::FindOptions,
};
use std::sync::Arc;
use tracing::instrument;

use crate::error::AgendaResult;
use crate::models::{DeleteResult, Event, EventPatch, InsertResult, NewEvent, UpdateResult};
use crate::query::EventQuery;
use crate::repository::EventRepository;

/// Collection holding agenda events.
pub const COLLECTION: &str = "agendaEventos";

/// MongoDB implementation of the EventRepository
///
/// Holds the shared lazy handle, so building a repository never touches the
/// network; the first query does.
pub struct MongoEventRepository {
    db: Arc<LazyDatabase>,
    collection_name: String,
}

impl MongoEventRepository {
    /// # Example
    /// ```ignore
    /// let db = Arc::new(LazyDatabase::new(MongoConfig::from_env()?));
    /// let repo = MongoEventRepository::new(db);
    /// ```
    pub fn new(db: Arc<LazyDatabase>) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(db: Arc<LazyDatabase>, collection_name: &str) -> Self {
        Self {
            db,
            collection_name: collection_name.to_string(),
        }
    }

    async fn collection<T: Send + Sync>(&self) -> AgendaResult<Collection<T>> {
        Ok(self.db.get().await?.collection::<T>(&self.collection_name))
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn find(&self, query: EventQuery) -> AgendaResult<Vec<Event>> {
        let options = FindOptions::builder().sort(query.sort).build();

        let cursor = self
            .collection::<Event>()
            .await?
            .find(query.filter)
            .with_options(options)
            .await?;
        let events: Vec<Event> = cursor.try_collect().await?;

        tracing::debug!(count = events.len(), "Events fetched");
        Ok(events)
    }

    #[instrument(skip(self, event), fields(n_registro = %event.n_registro))]
    async fn insert(&self, event: NewEvent) -> AgendaResult<InsertResult> {
        let result: InsertResult = self
            .collection::<NewEvent>()
            .await?
            .insert_one(&event)
            .await?
            .into();

        tracing::info!(event_id = %result.inserted_id, "Event created successfully");
        Ok(result)
    }

    #[instrument(skip(self, patch), fields(event_id = %id))]
    async fn update(&self, id: ObjectId, patch: EventPatch) -> AgendaResult<UpdateResult> {
        let set = patch.to_set_document()?;

        let result: UpdateResult = self
            .collection::<Event>()
            .await?
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?
            .into();

        tracing::info!(
            matched = result.matched_count,
            modified = result.modified_count,
            "Event update applied"
        );
        Ok(result)
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn delete(&self, id: ObjectId) -> AgendaResult<DeleteResult> {
        let result: DeleteResult = self
            .collection::<Event>()
            .await?
            .delete_one(doc! { "_id": id })
            .await?
            .into();

        tracing::info!(deleted = result.deleted_count, "Event delete applied");
        Ok(result)
    }
}
