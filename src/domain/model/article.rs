use super::{ArticleId, ArticleState, GroupId, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Article document. `state` mirrors the group's moderation queue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub group_id: GroupId,
    pub created_by: UserId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub media: Vec<String>,
    pub state: ArticleState,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_at: Option<OffsetDateTime>,
}

impl Article {
    pub fn new(group_id: GroupId, created_by: UserId, draft: ArticleDraft) -> Self {
        Self {
            id: ArticleId::new(),
            group_id,
            created_by,
            title: draft.title,
            content: draft.content,
            media: draft.media,
            state: ArticleState::Pending,
            created_at: OffsetDateTime::now_utc(),
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Author-supplied fields of a new group article. Media are already-uploaded URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub media: Vec<String>,
}
