//! Database library providing MongoDB connectors and utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{LazyDatabase, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "agenda");
//! let db = LazyDatabase::new(config);
//!
//! // The first call connects; every later (or concurrent) call reuses the handle.
//! let database = db.get().await?;
//! let collection = database.collection::<Document>("agendaEventos");
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
