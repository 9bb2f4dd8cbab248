//! MongoDB Article Repository implementation

use super::connection::ARTICLES;
use super::{upsert, MongoConnection};
use crate::domain::error::DomainError;
use crate::domain::model::{Article, ArticleId, GroupId, UserId};
use crate::domain::repository::{ArticleRepository, Result};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Collection;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub struct MongoArticleRepository {
    collection: Collection<Article>,
}

impl MongoArticleRepository {
    pub fn new(conn: Arc<MongoConnection>) -> Self {
        Self {
            collection: conn.collection(ARTICLES),
        }
    }
}

#[async_trait]
impl ArticleRepository for MongoArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>> {
        Ok(self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?)
    }

    async fn save(&self, article: &Article) -> Result<()> {
        self.collection
            .replace_one(doc! { "id": article.id.to_string() }, article)
            .with_options(upsert())
            .await?;

        Ok(())
    }

    async fn soft_delete_by_author(
        &self,
        group: GroupId,
        author: UserId,
        at: OffsetDateTime,
    ) -> Result<u64> {
        // Stored in the same RFC 3339 form the serde mapping writes
        let deleted_at = at
            .format(&Rfc3339)
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let result = self
            .collection
            .update_many(
                doc! {
                    "groupId": group.to_string(),
                    "createdBy": author.to_string(),
                    "deletedAt": null,
                },
                doc! { "$set": { "deletedAt": deleted_at } },
            )
            .await?;

        Ok(result.modified_count)
    }
}
