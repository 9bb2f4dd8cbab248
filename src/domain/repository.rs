use crate::domain::error::DomainError;
use crate::domain::model::{Article, ArticleId, Group, GroupId, User, UserId};
use async_trait::async_trait;
use time::OffsetDateTime;

pub type Result<T> = std::result::Result<T, DomainError>;

/// Repository trait for Group documents. `save` replaces the whole document,
/// so concurrent writers on one group are last-writer-wins.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>>;
    async fn save(&self, group: &Group) -> Result<()>;
}

/// Repository trait for Article documents
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>>;
    async fn save(&self, article: &Article) -> Result<()>;

    /// Mark every live article `author` wrote in `group` as deleted at `at`.
    /// Returns the number of articles affected.
    async fn soft_delete_by_author(
        &self,
        group: GroupId,
        author: UserId,
        at: OffsetDateTime,
    ) -> Result<u64>;
}

/// Repository trait for the user directory
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
    async fn save(&self, user: &User) -> Result<()>;
}

/// Writes a group document and one of its article documents atomically, so
/// the moderation queue entry and the article's own `state` cannot diverge.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn save_group_and_article(&self, group: &Group, article: &Article) -> Result<()>;
}
