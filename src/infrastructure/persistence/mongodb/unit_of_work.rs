//! Multi-document writes in a MongoDB transaction.
//!
//! Transactions need a replica set or sharded cluster; a standalone server
//! rejects `start_transaction`.

use super::connection::{ARTICLES, GROUPS};
use super::{upsert, MongoConnection};
use crate::domain::model::{Article, Group};
use crate::domain::repository::{Result, UnitOfWork};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, ClientSession, Collection};
use std::sync::Arc;

pub struct MongoUnitOfWork {
    client: Client,
    groups: Collection<Group>,
    articles: Collection<Article>,
}

impl MongoUnitOfWork {
    pub fn new(conn: Arc<MongoConnection>) -> Self {
        Self {
            client: conn.client().clone(),
            groups: conn.collection(GROUPS),
            articles: conn.collection(ARTICLES),
        }
    }

    async fn write_both(
        &self,
        session: &mut ClientSession,
        group: &Group,
        article: &Article,
    ) -> Result<()> {
        self.groups
            .replace_one(doc! { "id": group.id.to_string() }, group)
            .with_options(upsert())
            .session(&mut *session)
            .await?;

        self.articles
            .replace_one(doc! { "id": article.id.to_string() }, article)
            .with_options(upsert())
            .session(&mut *session)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for MongoUnitOfWork {
    async fn save_group_and_article(&self, group: &Group, article: &Article) -> Result<()> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        if let Err(e) = self.write_both(&mut session, group, article).await {
            if let Err(abort_err) = session.abort_transaction().await {
                tracing::warn!("Failed to abort transaction: {}", abort_err);
            }
            return Err(e);
        }

        session.commit_transaction().await?;
        Ok(())
    }
}
