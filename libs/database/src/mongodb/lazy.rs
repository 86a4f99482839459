//! Process-wide MongoDB handle that connects on first use.

use mongodb::{Client, Database};
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use super::{MongoConfig, MongoError, connect_from_config};

struct Connection {
    client: Client,
    database: Database,
}

/// Lazily connected, memoized MongoDB database handle.
///
/// The first caller of [`LazyDatabase::get`] opens the connection. Callers that
/// arrive while that attempt is in flight wait for it instead of opening their
/// own. A failed attempt is not cached, so the next caller tries again.
///
/// Share it behind an `Arc`; the driver pools connections internally.
pub struct LazyDatabase {
    config: MongoConfig,
    connection: OnceCell<Connection>,
    attempts: AtomicU32,
}

impl LazyDatabase {
    pub fn new(config: MongoConfig) -> Self {
        Self {
            config,
            connection: OnceCell::new(),
            attempts: AtomicU32::new(0),
        }
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    /// Whether a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }

    /// Number of connection attempts started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Get the database, connecting first if needed.
    pub async fn get(&self) -> Result<&Database, MongoError> {
        Ok(&self.connection().await?.database)
    }

    /// Get the underlying client, connecting first if needed.
    pub async fn client(&self) -> Result<&Client, MongoError> {
        Ok(&self.connection().await?.client)
    }

    #[instrument(skip(self), fields(database = %self.config.database))]
    async fn connection(&self) -> Result<&Connection, MongoError> {
        self.connection
            .get_or_try_init(|| async {
                let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(attempt, "Opening MongoDB connection");

                let client = connect_from_config(&self.config).await?;
                let database = client.database(&self.config.database);
                Ok::<_, MongoError>(Connection { client, database })
            })
            .await
    }
}
