//! Agenda Domain
//!
//! Agenda events ("agendaEventos") stored in MongoDB: field rules for write
//! bodies, the store filters behind each listing endpoint, and the axum
//! handlers that tie them together.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation rules + query builder
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Event, payload, write results
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::{LazyDatabase, MongoConfig};
//! use domain_agenda::{EventService, MongoEventRepository, handlers};
//! use std::sync::Arc;
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "fatec");
//! let db = Arc::new(LazyDatabase::new(config));
//!
//! let service = EventService::new(MongoEventRepository::new(db));
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{AgendaError, AgendaResult};
pub use handlers::ApiDoc;
pub use models::{DeleteResult, Event, EventPatch, EventPayload, InsertResult, NewEvent, UpdateResult};
pub use mongodb::MongoEventRepository;
pub use query::EventQuery;
pub use repository::EventRepository;
pub use service::EventService;
pub use validation::{FieldError, FieldErrorKind};
