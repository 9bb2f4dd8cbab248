pub mod mongodb;
pub mod sqlite;

use crate::domain::repository::{ArticleRepository, GroupRepository, UnitOfWork, UserRepository};
use crate::infrastructure::config::{StorageConfig, StorageType};
use std::sync::Arc;

/// Storage backend holder: one set of repositories sharing a connection
#[derive(Clone)]
pub struct Repositories {
    pub groups: Arc<dyn GroupRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub users: Arc<dyn UserRepository>,
    pub unit_of_work: Arc<dyn UnitOfWork>,
}

impl Repositories {
    pub fn sqlite(conn: sqlite::DbConnection) -> Self {
        use self::sqlite::{
            SqliteArticleRepository, SqliteGroupRepository, SqliteUnitOfWork,
            SqliteUserRepository,
        };

        Self {
            groups: Arc::new(SqliteGroupRepository::new(conn.clone())),
            articles: Arc::new(SqliteArticleRepository::new(conn.clone())),
            users: Arc::new(SqliteUserRepository::new(conn.clone())),
            unit_of_work: Arc::new(SqliteUnitOfWork::new(conn)),
        }
    }

    pub fn mongodb(conn: Arc<self::mongodb::MongoConnection>) -> Self {
        use self::mongodb::{
            MongoArticleRepository, MongoGroupRepository, MongoUnitOfWork, MongoUserRepository,
        };

        Self {
            groups: Arc::new(MongoGroupRepository::new(conn.clone())),
            articles: Arc::new(MongoArticleRepository::new(conn.clone())),
            users: Arc::new(MongoUserRepository::new(conn.clone())),
            unit_of_work: Arc::new(MongoUnitOfWork::new(conn)),
        }
    }
}

/// Initialize storage based on configuration
pub async fn init_storage(config: &StorageConfig) -> anyhow::Result<Repositories> {
    match config.storage_type {
        StorageType::Sqlite => {
            tracing::info!("Using SQLite storage backend");
            let conn = if config.sqlite.is_in_memory() {
                tracing::warn!("SQLite database is in-memory; data is lost on shutdown");
                sqlite::init_in_memory()?
            } else {
                sqlite::init_database(&config.sqlite.effective_path())?
            };
            Ok(Repositories::sqlite(conn))
        }
        StorageType::Mongodb => {
            tracing::info!("Using MongoDB storage backend");
            let mongo = &config.mongodb;
            let conn = self::mongodb::init_mongodb(&mongo.uri, &mongo.database).await?;
            Ok(Repositories::mongodb(conn))
        }
    }
}
