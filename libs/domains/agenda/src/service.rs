//! Agenda Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{AgendaError, AgendaResult};
use crate::models::{DeleteResult, Event, EventPayload, InsertResult, UpdateResult};
use crate::query::{EventQuery, parse_object_id};
use crate::repository::EventRepository;
use crate::validation::{validate_event_patch, validate_new_event};

/// Validates write bodies, builds listing queries and hands both to the repository.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All events sorted by title
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> AgendaResult<Vec<Event>> {
        self.repository.find(EventQuery::all()).await
    }

    /// Zero or one event with the given id
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> AgendaResult<Vec<Event>> {
        let id = parse_object_id(id)?;
        self.repository.find(EventQuery::by_id(id)).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_title(&self, fragment: &str) -> AgendaResult<Vec<Event>> {
        self.repository.find(EventQuery::by_title(fragment)).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_price_and_year(&self) -> AgendaResult<Vec<Event>> {
        self.repository.find(EventQuery::by_price_and_year()).await
    }

    #[instrument(skip(self, payload))]
    pub async fn create_event(&self, payload: EventPayload) -> AgendaResult<InsertResult> {
        let event = validate_new_event(&payload).map_err(AgendaError::Validation)?;
        self.repository.insert(event).await
    }

    /// Update the event named by the body's `_id`; the id itself is never written
    #[instrument(skip(self, payload))]
    pub async fn update_event(&self, payload: EventPayload) -> AgendaResult<UpdateResult> {
        let (id, patch) = validate_event_patch(&payload).map_err(AgendaError::Validation)?;
        self.repository.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: &str) -> AgendaResult<DeleteResult> {
        let id = parse_object_id(id)?;
        self.repository.delete(id).await
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventPatch;
    use crate::repository::MockEventRepository;
    use mockall::predicate::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    fn payload(value: serde_json::Value) -> EventPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_list_events_sorts_by_title() {
        let mut mock = MockEventRepository::new();
        mock.expect_find()
            .with(eq(EventQuery::all()))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = EventService::new(mock);
        assert!(service.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_rejects_malformed_id_without_touching_store() {
        let mut mock = MockEventRepository::new();
        mock.expect_find().never();

        let service = EventService::new(mock);
        let err = service.find_by_id("not-an-objectid").await.unwrap_err();
        assert!(matches!(err, AgendaError::InvalidIdentifier { .. }));
    }

    #[tokio::test]
    async fn test_find_by_id_queries_by_object_id() {
        let id = ObjectId::new();
        let mut mock = MockEventRepository::new();
        mock.expect_find()
            .withf(move |q| q.filter == doc! { "_id": id })
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = EventService::new(mock);
        service.find_by_id(&id.to_hex()).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_event_with_invalid_body_never_inserts() {
        let mut mock = MockEventRepository::new();
        mock.expect_insert().never();

        let service = EventService::new(mock);
        let err = service
            .create_event(payload(json!({ "n_registro": "12ab" })))
            .await
            .unwrap_err();

        match err {
            AgendaError::Validation(errors) => assert!(errors.len() >= 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_event_inserts_validated_event() {
        let mut mock = MockEventRepository::new();
        mock.expect_insert()
            .withf(|e| e.n_registro == "12345678" && e.titulo == "Show")
            .times(1)
            .returning(|_| {
                Ok(InsertResult {
                    acknowledged: true,
                    inserted_id: "65a1f0c2e4b0a1b2c3d4e5f6".to_string(),
                })
            });

        let service = EventService::new(mock);
        let result = service
            .create_event(payload(json!({
                "n_registro": "12345678",
                "titulo": "Show",
                "custo": 120.5,
                "data": "01/12/2023"
            })))
            .await
            .unwrap();
        assert_eq!(result.inserted_id, "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[tokio::test]
    async fn test_update_event_passes_id_separately_from_patch() {
        let id = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let expected = EventPatch {
            n_registro: "12345678".to_string(),
            titulo: Some("New".to_string()),
            ..Default::default()
        };

        let mut mock = MockEventRepository::new();
        mock.expect_update()
            .with(eq(id), eq(expected))
            .times(1)
            .returning(|_, _| {
                Ok(UpdateResult {
                    acknowledged: true,
                    matched_count: 1,
                    modified_count: 1,
                })
            });

        let service = EventService::new(mock);
        let result = service
            .update_event(payload(json!({
                "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
                "n_registro": "12345678",
                "titulo": "New"
            })))
            .await
            .unwrap();
        assert_eq!(result.modified_count, 1);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_zero_count_success() {
        let mut mock = MockEventRepository::new();
        mock.expect_delete().times(1).returning(|_| {
            Ok(DeleteResult {
                acknowledged: true,
                deleted_count: 0,
            })
        });

        let service = EventService::new(mock);
        let result = service.delete_event(&ObjectId::new().to_hex()).await.unwrap();
        assert_eq!(result.deleted_count, 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let mut mock = MockEventRepository::new();
        mock.expect_find()
            .returning(|_| Err(AgendaError::Database("timeout".to_string())));

        let service = EventService::new(mock);
        let err = service.find_by_price_and_year().await.unwrap_err();
        assert!(matches!(err, AgendaError::Database(_)));
    }
}
