mod article_repo;
mod group_repo;
mod unit_of_work;
mod user_repo;

pub use article_repo::SqliteArticleRepository;
pub use group_repo::SqliteGroupRepository;
pub use unit_of_work::SqliteUnitOfWork;
pub use user_repo::SqliteUserRepository;

use crate::domain::error::DomainError;
use crate::domain::repository::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub type DbConnection = Arc<Mutex<Connection>>;

/// Initialize the SQLite database at `db_path`
pub fn init_database(db_path: &Path) -> anyhow::Result<DbConnection> {
    // Ensure directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("Initializing database at {:?}", db_path);

    let conn = Connection::open(db_path)?;
    create_schema(&conn)?;

    tracing::info!("Database initialized successfully");

    Ok(Arc::new(Mutex::new(conn)))
}

/// Private in-memory database, used by tests and `storage.sqlite.path: ":memory:"`
pub fn init_in_memory() -> anyhow::Result<DbConnection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    // Groups are stored whole; the nested member/admin/queue collections
    // only ever change through a read-modify-write of the document.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS groups (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            document TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS articles (
            id TEXT PRIMARY KEY,
            group_id TEXT NOT NULL,
            created_by TEXT NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            media TEXT NOT NULL,
            state TEXT NOT NULL,
            created_at TEXT NOT NULL,
            deleted_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_articles_group_author
         ON articles (group_id, created_by)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            avatar TEXT,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

fn lock(conn: &DbConnection) -> Result<std::sync::MutexGuard<'_, Connection>> {
    conn.lock().map_err(|e| DomainError::Database(e.to_string()))
}

fn format_timestamp(at: OffsetDateTime) -> Result<String> {
    at.format(&Rfc3339)
        .map_err(|e| DomainError::Database(e.to_string()))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::Database(e.to_string()))
}

fn parse_column<T: std::str::FromStr<Err = DomainError>>(value: &str) -> Result<T> {
    // A malformed stored value is corruption, not bad input
    value
        .parse()
        .map_err(|e: DomainError| DomainError::Database(e.to_string()))
}
