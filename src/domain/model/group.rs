use super::{ArticleId, GroupId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::domain::error::DomainError;

/// Lifecycle state shared by member entries and administrator invitations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipState {
    Pending,
    Accepted,
    Rejected,
}

impl MembershipState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for MembershipState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::Invalid(format!("unknown membership state: {}", other))),
        }
    }
}

/// Moderation state of a group article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleState {
    Pending,
    Processed,
    Rejected,
}

impl ArticleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ArticleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processed" => Ok(Self::Processed),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::Invalid(format!("unknown article state: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEntry {
    pub user: UserId,
    pub state: MembershipState,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEntry {
    pub user: UserId,
    pub state: MembershipState,
    #[serde(with = "time::serde::rfc3339")]
    pub invited_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleEntry {
    pub article: ArticleId,
    pub state: ArticleState,
}

/// Group document.
///
/// `members` and `administrators` are independent collections: an accepted
/// administrator need not hold an accepted member entry. The owner appears in
/// neither and holds full authority implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub owner: UserId,
    #[serde(default)]
    pub members: Vec<MemberEntry>,
    #[serde(default)]
    pub administrators: Vec<AdminEntry>,
    #[serde(default)]
    pub articles: Vec<ArticleEntry>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Owner-supplied fields of a new group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub rules: Vec<String>,
}

impl Group {
    pub fn new(owner: UserId, new_group: NewGroup) -> Self {
        Self {
            id: GroupId::new(),
            name: new_group.name,
            description: new_group.description,
            avatar: new_group.avatar,
            owner,
            members: Vec::new(),
            administrators: Vec::new(),
            articles: Vec::new(),
            rules: new_group.rules,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn is_owner(&self, user: UserId) -> bool {
        self.owner == user
    }

    pub fn member(&self, user: UserId) -> Option<&MemberEntry> {
        self.members.iter().find(|m| m.user == user)
    }

    pub fn administrator(&self, user: UserId) -> Option<&AdminEntry> {
        self.administrators.iter().find(|a| a.user == user)
    }

    pub fn is_accepted_member(&self, user: UserId) -> bool {
        self.member(user)
            .is_some_and(|m| m.state == MembershipState::Accepted)
    }

    pub fn is_accepted_admin(&self, user: UserId) -> bool {
        self.administrator(user)
            .is_some_and(|a| a.state == MembershipState::Accepted)
    }

    /// Owner, accepted administrator or accepted member
    pub fn is_participant(&self, user: UserId) -> bool {
        self.is_owner(user) || self.is_accepted_admin(user) || self.is_accepted_member(user)
    }

    pub fn members_in_state(&self, state: MembershipState) -> impl Iterator<Item = &MemberEntry> {
        self.members.iter().filter(move |m| m.state == state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_document_uses_camel_case() {
        let mut group = Group::new(
            UserId::new(),
            NewGroup {
                name: "Hikers".to_string(),
                ..Default::default()
            },
        );
        group.members.push(MemberEntry {
            user: UserId::new(),
            state: MembershipState::Pending,
            joined_at: OffsetDateTime::now_utc(),
        });

        let json = serde_json::to_value(&group).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["members"][0]["state"], "pending");
        assert!(json["members"][0].get("joinedAt").is_some());

        let back: Group = serde_json::from_value(json).unwrap();
        assert_eq!(back, group);
    }

    #[test]
    fn test_article_state_parsing() {
        assert_eq!("processed".parse::<ArticleState>().unwrap(), ArticleState::Processed);
        assert!(matches!(
            "approved".parse::<ArticleState>(),
            Err(DomainError::Invalid(_))
        ));
    }
}
