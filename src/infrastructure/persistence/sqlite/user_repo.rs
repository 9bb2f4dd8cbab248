use super::{format_timestamp, lock, parse_column, parse_timestamp, DbConnection};
use crate::domain::model::{User, UserId};
use crate::domain::repository::{Result, UserRepository};
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

pub struct SqliteUserRepository {
    conn: DbConnection,
}

impl SqliteUserRepository {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let conn = lock(&self.conn)?;

        let row: Option<(String, String, Option<String>, String)> = conn
            .query_row(
                "SELECT id, name, avatar, created_at FROM users WHERE id = ?",
                params![id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        match row {
            Some((id, name, avatar, created_at)) => Ok(Some(User {
                id: parse_column(&id)?,
                name,
                avatar,
                created_at: parse_timestamp(&created_at)?,
            })),
            None => Ok(None),
        }
    }

    async fn save(&self, user: &User) -> Result<()> {
        let conn = lock(&self.conn)?;

        conn.execute(
            "INSERT OR REPLACE INTO users (id, name, avatar, created_at)
             VALUES (?, ?, ?, ?)",
            params![
                user.id.to_string(),
                user.name,
                user.avatar,
                format_timestamp(user.created_at)?,
            ],
        )?;

        Ok(())
    }
}
