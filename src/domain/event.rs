use super::model::{ArticleId, ArticleState, GroupId, UserId};
use serde::{Deserialize, Serialize};

/// Domain events emitted after a workflow transition has been persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum DomainEvent {
    /// A user asked to join a group
    JoinRequested { group_id: GroupId, user_id: UserId },

    /// A participant invited a user into a group
    MemberInvited {
        group_id: GroupId,
        inviter_id: UserId,
        user_id: UserId,
    },

    /// A pending membership became accepted
    MembershipAccepted { group_id: GroupId, user_id: UserId },

    /// A member was removed by the owner or an administrator
    MemberRemoved {
        group_id: GroupId,
        user_id: UserId,
        removed_by: UserId,
    },

    /// The owner invited a member to become administrator
    AdminInvited { group_id: GroupId, user_id: UserId },

    /// An administrator invitation was accepted
    AdminInvitationAccepted { group_id: GroupId, user_id: UserId },

    /// A group article entered the moderation queue
    ArticleSubmitted {
        group_id: GroupId,
        article_id: ArticleId,
        author_id: UserId,
    },

    /// A queued article was processed or rejected
    ArticleModerated {
        group_id: GroupId,
        article_id: ArticleId,
        state: ArticleState,
    },
}

impl DomainEvent {
    pub fn group_id(&self) -> GroupId {
        match self {
            Self::JoinRequested { group_id, .. }
            | Self::MemberInvited { group_id, .. }
            | Self::MembershipAccepted { group_id, .. }
            | Self::MemberRemoved { group_id, .. }
            | Self::AdminInvited { group_id, .. }
            | Self::AdminInvitationAccepted { group_id, .. }
            | Self::ArticleSubmitted { group_id, .. }
            | Self::ArticleModerated { group_id, .. } => *group_id,
        }
    }

    /// Get the event type name for subscriber routing
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::JoinRequested { .. } => "join_requested",
            Self::MemberInvited { .. } => "member_invited",
            Self::MembershipAccepted { .. } => "membership_accepted",
            Self::MemberRemoved { .. } => "member_removed",
            Self::AdminInvited { .. } => "admin_invited",
            Self::AdminInvitationAccepted { .. } => "admin_invitation_accepted",
            Self::ArticleSubmitted { .. } => "article_submitted",
            Self::ArticleModerated { .. } => "article_moderated",
        }
    }
}
