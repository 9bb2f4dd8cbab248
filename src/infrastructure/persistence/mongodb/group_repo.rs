//! MongoDB Group Repository implementation

use super::connection::GROUPS;
use super::{upsert, MongoConnection};
use crate::domain::model::{Group, GroupId};
use crate::domain::repository::{GroupRepository, Result};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Collection;
use std::sync::Arc;

pub struct MongoGroupRepository {
    collection: Collection<Group>,
}

impl MongoGroupRepository {
    pub fn new(conn: Arc<MongoConnection>) -> Self {
        Self {
            collection: conn.collection(GROUPS),
        }
    }
}

#[async_trait]
impl GroupRepository for MongoGroupRepository {
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>> {
        Ok(self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?)
    }

    async fn save(&self, group: &Group) -> Result<()> {
        self.collection
            .replace_one(doc! { "id": group.id.to_string() }, group)
            .with_options(upsert())
            .await?;

        Ok(())
    }
}
