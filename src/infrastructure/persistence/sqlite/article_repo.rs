use super::{format_timestamp, lock, parse_column, parse_timestamp, DbConnection};
use crate::domain::model::{Article, ArticleId, GroupId, UserId};
use crate::domain::repository::{ArticleRepository, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use time::OffsetDateTime;

pub struct SqliteArticleRepository {
    conn: DbConnection,
}

impl SqliteArticleRepository {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }
}

/// Raw column values, converted to the domain type outside the row callback
struct ArticleRow {
    id: String,
    group_id: String,
    created_by: String,
    title: String,
    content: String,
    media: String,
    state: String,
    created_at: String,
    deleted_at: Option<String>,
}

impl ArticleRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            group_id: row.get(1)?,
            created_by: row.get(2)?,
            title: row.get(3)?,
            content: row.get(4)?,
            media: row.get(5)?,
            state: row.get(6)?,
            created_at: row.get(7)?,
            deleted_at: row.get(8)?,
        })
    }

    fn into_article(self) -> Result<Article> {
        Ok(Article {
            id: parse_column(&self.id)?,
            group_id: parse_column(&self.group_id)?,
            created_by: parse_column(&self.created_by)?,
            title: self.title,
            content: self.content,
            media: serde_json::from_str(&self.media)?,
            state: parse_column(&self.state)?,
            created_at: parse_timestamp(&self.created_at)?,
            deleted_at: self
                .deleted_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
        })
    }
}

pub(super) fn write_article(conn: &Connection, article: &Article) -> Result<()> {
    let media_json = serde_json::to_string(&article.media)?;
    let deleted_at = article.deleted_at.map(format_timestamp).transpose()?;

    conn.execute(
        "INSERT OR REPLACE INTO articles
         (id, group_id, created_by, title, content, media, state, created_at, deleted_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            article.id.to_string(),
            article.group_id.to_string(),
            article.created_by.to_string(),
            article.title,
            article.content,
            media_json,
            article.state.as_str(),
            format_timestamp(article.created_at)?,
            deleted_at,
        ],
    )?;

    Ok(())
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>> {
        let conn = lock(&self.conn)?;

        let row = conn
            .query_row(
                "SELECT id, group_id, created_by, title, content, media, state,
                        created_at, deleted_at
                 FROM articles WHERE id = ?",
                params![id.to_string()],
                ArticleRow::read,
            )
            .optional()?;

        row.map(ArticleRow::into_article).transpose()
    }

    async fn save(&self, article: &Article) -> Result<()> {
        let conn = lock(&self.conn)?;
        write_article(&conn, article)
    }

    async fn soft_delete_by_author(
        &self,
        group: GroupId,
        author: UserId,
        at: OffsetDateTime,
    ) -> Result<u64> {
        let conn = lock(&self.conn)?;

        let affected = conn.execute(
            "UPDATE articles SET deleted_at = ?
             WHERE group_id = ? AND created_by = ? AND deleted_at IS NULL",
            params![format_timestamp(at)?, group.to_string(), author.to_string()],
        )?;

        Ok(affected as u64)
    }
}
