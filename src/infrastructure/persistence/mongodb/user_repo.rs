//! MongoDB User Repository implementation

use super::connection::USERS;
use super::{upsert, MongoConnection};
use crate::domain::model::{User, UserId};
use crate::domain::repository::{Result, UserRepository};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Collection;
use std::sync::Arc;

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(conn: Arc<MongoConnection>) -> Self {
        Self {
            collection: conn.collection(USERS),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?)
    }

    async fn save(&self, user: &User) -> Result<()> {
        self.collection
            .replace_one(doc! { "id": user.id.to_string() }, user)
            .with_options(upsert())
            .await?;

        Ok(())
    }
}
