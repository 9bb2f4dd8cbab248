use super::{lock, DbConnection};
use crate::domain::model::{Group, GroupId};
use crate::domain::repository::{GroupRepository, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteGroupRepository {
    conn: DbConnection,
}

impl SqliteGroupRepository {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }
}

pub(super) fn write_group(conn: &Connection, group: &Group) -> Result<()> {
    let document = serde_json::to_string(group)?;

    conn.execute(
        "INSERT OR REPLACE INTO groups (id, name, owner_id, document)
         VALUES (?, ?, ?, ?)",
        params![
            group.id.to_string(),
            group.name,
            group.owner.to_string(),
            document,
        ],
    )?;

    Ok(())
}

#[async_trait]
impl GroupRepository for SqliteGroupRepository {
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>> {
        let conn = lock(&self.conn)?;

        let document: Option<String> = conn
            .query_row(
                "SELECT document FROM groups WHERE id = ?",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, group: &Group) -> Result<()> {
        let conn = lock(&self.conn)?;
        write_group(&conn, group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{NewGroup, UserId};
    use crate::infrastructure::persistence::sqlite::init_in_memory;
    use time::OffsetDateTime;

    #[tokio::test]
    async fn test_save_replaces_whole_document() {
        let repo = SqliteGroupRepository::new(init_in_memory().unwrap());
        let mut group = Group::new(
            UserId::new(),
            NewGroup {
                name: "Readers".to_string(),
                ..Default::default()
            },
        );
        repo.save(&group).await.unwrap();

        group
            .request_join(UserId::new(), OffsetDateTime::now_utc())
            .unwrap();
        group.rules = vec!["Be kind".to_string()];
        repo.save(&group).await.unwrap();

        let loaded = repo.find_by_id(group.id).await.unwrap().unwrap();
        assert_eq!(loaded, group);
        assert!(repo.find_by_id(GroupId::new()).await.unwrap().is_none());
    }
}
