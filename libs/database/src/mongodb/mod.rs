//! MongoDB connector and utilities
//!
//! Provides connection management and MongoDB-specific helpers.

mod config;
mod connector;
mod health;
mod lazy;

pub use config::MongoConfig;
pub use connector::{MongoError, connect_from_config};
pub use health::{HealthStatus, check_health};
pub use lazy::LazyDatabase;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
