use super::article_repo::write_article;
use super::group_repo::write_group;
use super::{lock, DbConnection};
use crate::domain::model::{Article, Group};
use crate::domain::repository::{Result, UnitOfWork};
use async_trait::async_trait;

pub struct SqliteUnitOfWork {
    conn: DbConnection,
}

impl SqliteUnitOfWork {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn save_group_and_article(&self, group: &Group, article: &Article) -> Result<()> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;

        write_group(&tx, group)?;
        write_article(&tx, article)?;

        tx.commit()?;
        Ok(())
    }
}
