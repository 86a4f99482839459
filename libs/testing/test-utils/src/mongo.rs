//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that runs a MongoDB container for testing.

use database::mongodb::{LazyDatabase, MongoConfig};
use std::sync::Arc;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let db = mongo.lazy_database("my_test_db");
/// let handle = db.get().await.unwrap();
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 7 container.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}/?directConnection=true", host_port);

        tracing::info!(port = host_port, "Test MongoDB ready (mongo 7)");

        Self {
            container,
            connection_string,
        }
    }

    /// Connection settings for `database` on this container.
    pub fn config(&self, database: &str) -> MongoConfig {
        MongoConfig::with_database(self.connection_string.clone(), database)
            .with_app_name("test-utils")
            .with_server_selection_timeout(5)
    }

    /// A not-yet-connected handle, ready to pass to a repository.
    pub fn lazy_database(&self, database: &str) -> Arc<LazyDatabase> {
        Arc::new(LazyDatabase::new(self.config(database)))
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
