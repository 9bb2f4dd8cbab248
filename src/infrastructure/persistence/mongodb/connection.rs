//! MongoDB connection management
//!
//! Provides timeout configuration for MongoDB operations. The `MongoConnection`
//! wrapper keeps the client (needed for transactional sessions) next to the
//! database reference.

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use std::sync::Arc;
use std::time::Duration;

/// Connection timeout for MongoDB operations.
/// Applies to both initial connection and server selection.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(3);

pub const GROUPS: &str = "groups";
pub const ARTICLES: &str = "articles";
pub const USERS: &str = "users";

pub struct MongoConnection {
    client: Client,
    database: Database,
}

impl MongoConnection {
    /// Create a new MongoDB connection with timeout configuration.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The URI is invalid
    /// - Connection cannot be established within timeout
    /// - Database ping fails
    pub async fn new(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let options = Self::create_client_options(uri).await?;
        let client = Client::with_options(options)?;
        let database = client.database(db_name);

        // Ping to verify connection is actually working
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!("Connected to MongoDB: {}", db_name);

        Ok(Self { client, database })
    }

    /// Get a typed collection from the database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> mongodb::Collection<T> {
        self.database.collection(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Create the lookup indexes the repositories rely on. Idempotent.
    pub async fn ensure_indexes(&self) -> anyhow::Result<()> {
        let unique_id = || {
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build()
        };

        for name in [GROUPS, ARTICLES, USERS] {
            self.collection::<mongodb::bson::Document>(name)
                .create_index(unique_id())
                .await?;
        }

        self.collection::<mongodb::bson::Document>(ARTICLES)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "groupId": 1, "createdBy": 1 })
                    .build(),
            )
            .await?;

        tracing::debug!("MongoDB indexes ensured");
        Ok(())
    }

    /// Create client options with timeout configuration.
    async fn create_client_options(uri: &str) -> anyhow::Result<ClientOptions> {
        let mut options = ClientOptions::parse(uri).await?;
        options.connect_timeout = Some(CONNECTION_TIMEOUT);
        options.server_selection_timeout = Some(CONNECTION_TIMEOUT);
        Ok(options)
    }
}

/// Initialize MongoDB connection and return a shared reference.
pub async fn init_mongodb(uri: &str, db_name: &str) -> anyhow::Result<Arc<MongoConnection>> {
    let conn = MongoConnection::new(uri, db_name).await?;
    conn.ensure_indexes().await?;
    Ok(Arc::new(conn))
}
