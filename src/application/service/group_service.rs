//! Group workflow orchestration: load the group document, apply one
//! transition, write it back, then notify. No locking: concurrent writers on
//! the same group are last-writer-wins at the document level.

use crate::application::eventbus::EventPublisher;
use crate::domain::error::DomainError;
use crate::domain::event::DomainEvent;
use crate::domain::model::{
    Article, ArticleDraft, ArticleId, ArticleState, Group, GroupId, MembershipState, NewGroup,
    User, UserId, UserSummary,
};
use crate::domain::permission::check_permissions;
use crate::domain::repository::{
    ArticleRepository, GroupRepository, Result, UnitOfWork, UserRepository,
};
use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;
use time::OffsetDateTime;

/// Member entry enriched with the user's display fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub user_id: UserId,
    pub profile: Option<UserSummary>,
    pub state: MembershipState,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

/// Administrator entry enriched with the user's display fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub user_id: UserId,
    pub profile: Option<UserSummary>,
    pub state: MembershipState,
    #[serde(with = "time::serde::rfc3339")]
    pub invited_at: OffsetDateTime,
}

pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    articles: Arc<dyn ArticleRepository>,
    users: Arc<dyn UserRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    publisher: Arc<dyn EventPublisher>,
}

impl GroupService {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        articles: Arc<dyn ArticleRepository>,
        users: Arc<dyn UserRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            groups,
            articles,
            users,
            unit_of_work,
            publisher,
        }
    }

    // ====== Groups ======

    pub async fn create_group(&self, owner: UserId, new_group: NewGroup) -> Result<Group> {
        if new_group.name.trim().is_empty() {
            return Err(DomainError::Invalid("group name must not be blank".to_string()));
        }
        self.ensure_user(owner).await?;

        let group = Group::new(owner, new_group);
        self.groups.save(&group).await?;

        tracing::info!(group_id = %group.id, owner = %owner, "Created group");
        Ok(group)
    }

    pub async fn get_group(&self, id: GroupId) -> Result<Group> {
        self.load(id).await
    }

    pub async fn update_rules(
        &self,
        id: GroupId,
        requester: UserId,
        rules: Vec<String>,
    ) -> Result<Group> {
        let mut group = self.load(id).await?;
        check_permissions(&group, requester, None)?;

        group.rules = rules;
        self.groups.save(&group).await?;
        Ok(group)
    }

    // ====== Membership ======

    pub async fn request_join(&self, id: GroupId, user: UserId) -> Result<Group> {
        self.ensure_user(user).await?;
        let mut group = self.load(id).await?;

        group.request_join(user, OffsetDateTime::now_utc())?;
        self.groups.save(&group).await?;

        tracing::info!(group_id = %id, user_id = %user, "Join requested");
        self.notify(DomainEvent::JoinRequested {
            group_id: id,
            user_id: user,
        });
        Ok(group)
    }

    pub async fn revoke_join_request(&self, id: GroupId, user: UserId) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.revoke_join_request(user)?;
        self.groups.save(&group).await?;
        Ok(group)
    }

    pub async fn invite_member(
        &self,
        id: GroupId,
        inviter: UserId,
        target: UserId,
    ) -> Result<Group> {
        self.ensure_user(target).await?;
        let mut group = self.load(id).await?;

        group.invite_member(inviter, target, OffsetDateTime::now_utc())?;
        self.groups.save(&group).await?;

        self.notify(DomainEvent::MemberInvited {
            group_id: id,
            inviter_id: inviter,
            user_id: target,
        });
        Ok(group)
    }

    pub async fn accept_invite(&self, id: GroupId, user: UserId) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.accept_invite(user)?;
        self.groups.save(&group).await?;

        tracing::info!(group_id = %id, user_id = %user, "Membership accepted");
        self.notify(DomainEvent::MembershipAccepted {
            group_id: id,
            user_id: user,
        });
        Ok(group)
    }

    pub async fn reject_invite(&self, id: GroupId, user: UserId) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.reject_invite(user)?;
        self.groups.save(&group).await?;
        Ok(group)
    }

    pub async fn leave_group(&self, id: GroupId, user: UserId) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.leave(user)?;
        self.groups.save(&group).await?;

        tracing::info!(group_id = %id, user_id = %user, "Member left");
        Ok(group)
    }

    /// Remove `target`, strip their administrator entry and soft-delete their
    /// articles in the group. The steps are not rolled back if a later one fails.
    pub async fn remove_member(
        &self,
        id: GroupId,
        requester: UserId,
        target: UserId,
    ) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.remove_member(requester, target)?;
        self.groups.save(&group).await?;

        let deleted = self
            .articles
            .soft_delete_by_author(id, target, OffsetDateTime::now_utc())
            .await?;

        tracing::info!(
            group_id = %id,
            user_id = %target,
            removed_by = %requester,
            deleted_articles = deleted,
            "Member removed"
        );
        self.notify(DomainEvent::MemberRemoved {
            group_id: id,
            user_id: target,
            removed_by: requester,
        });
        Ok(group)
    }

    pub async fn list_members(
        &self,
        id: GroupId,
        state: Option<MembershipState>,
    ) -> Result<Vec<MemberView>> {
        let group = self.load(id).await?;
        let entries: Vec<_> = match state {
            Some(state) => group.members_in_state(state).cloned().collect(),
            None => group.members,
        };

        let profiles = self.profiles(entries.iter().map(|m| m.user)).await?;

        Ok(entries
            .into_iter()
            .zip(profiles)
            .map(|(m, profile)| MemberView {
                user_id: m.user,
                profile,
                state: m.state,
                joined_at: m.joined_at,
            })
            .collect())
    }

    // ====== Administrators ======

    pub async fn invite_admin(
        &self,
        id: GroupId,
        requester: UserId,
        target: UserId,
    ) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.invite_admin(requester, target, OffsetDateTime::now_utc())?;
        self.groups.save(&group).await?;

        tracing::info!(group_id = %id, user_id = %target, "Administrator invited");
        self.notify(DomainEvent::AdminInvited {
            group_id: id,
            user_id: target,
        });
        Ok(group)
    }

    pub async fn accept_admin_invite(&self, id: GroupId, user: UserId) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.accept_admin_invite(user)?;
        self.groups.save(&group).await?;

        tracing::info!(group_id = %id, user_id = %user, "Administrator invitation accepted");
        self.notify(DomainEvent::AdminInvitationAccepted {
            group_id: id,
            user_id: user,
        });
        Ok(group)
    }

    pub async fn reject_admin_invite(&self, id: GroupId, user: UserId) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.reject_admin_invite(user)?;
        self.groups.save(&group).await?;
        Ok(group)
    }

    pub async fn cancel_admin_invite(
        &self,
        id: GroupId,
        requester: UserId,
        target: UserId,
    ) -> Result<Group> {
        let mut group = self.load(id).await?;
        group.cancel_admin_invite(requester, target)?;
        self.groups.save(&group).await?;
        Ok(group)
    }

    /// Drop any administrator entry for `user`. Membership is left alone.
    pub async fn remove_admin_role(&self, id: GroupId, user: UserId) -> Result<bool> {
        let mut group = self.load(id).await?;
        let removed = group.remove_admin_role(user);
        if removed {
            self.groups.save(&group).await?;
        }
        Ok(removed)
    }

    /// `remove_admin_role` for the owner, or for an administrator stepping down.
    pub async fn revoke_admin(
        &self,
        id: GroupId,
        requester: UserId,
        target: UserId,
    ) -> Result<bool> {
        let group = self.load(id).await?;
        if !group.is_owner(requester) && requester != target {
            return Err(DomainError::Forbidden(format!(
                "only the owner of group {} may revoke another administrator",
                id
            )));
        }
        self.remove_admin_role(id, target).await
    }

    pub async fn list_administrators(&self, id: GroupId) -> Result<Vec<AdminView>> {
        let group = self.load(id).await?;
        let profiles = self
            .profiles(group.administrators.iter().map(|a| a.user))
            .await?;

        Ok(group
            .administrators
            .into_iter()
            .zip(profiles)
            .map(|(a, profile)| AdminView {
                user_id: a.user,
                profile,
                state: a.state,
                invited_at: a.invited_at,
            })
            .collect())
    }

    // ====== Moderation ======

    pub async fn submit_article(
        &self,
        id: GroupId,
        author: UserId,
        draft: ArticleDraft,
    ) -> Result<Article> {
        if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
            return Err(DomainError::Invalid(
                "article title and content must not be blank".to_string(),
            ));
        }

        let mut group = self.load(id).await?;
        if !group.is_participant(author) {
            return Err(DomainError::Forbidden(format!(
                "user {} is not a member of group {}",
                author, id
            )));
        }

        let article = Article::new(id, author, draft);
        group.enqueue_article(article.id);
        self.unit_of_work
            .save_group_and_article(&group, &article)
            .await?;

        tracing::info!(group_id = %id, article_id = %article.id, "Article submitted");
        self.notify(DomainEvent::ArticleSubmitted {
            group_id: id,
            article_id: article.id,
            author_id: author,
        });
        Ok(article)
    }

    /// Apply `outcome` to the queue entry and the article document together.
    pub async fn moderate_article(
        &self,
        id: GroupId,
        requester: UserId,
        article_id: ArticleId,
        outcome: ArticleState,
    ) -> Result<Article> {
        let mut group = self.load(id).await?;
        group.moderate_article(requester, article_id, outcome)?;

        let mut article = self
            .articles
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("article {}", article_id)))?;
        article.state = outcome;

        self.unit_of_work
            .save_group_and_article(&group, &article)
            .await?;

        tracing::info!(
            group_id = %id,
            article_id = %article_id,
            state = %outcome,
            "Article moderated"
        );
        self.notify(DomainEvent::ArticleModerated {
            group_id: id,
            article_id,
            state: outcome,
        });
        Ok(article)
    }

    pub async fn pending_articles(&self, id: GroupId) -> Result<Vec<Article>> {
        self.articles_in_state(id, ArticleState::Pending).await
    }

    pub async fn processed_articles(&self, id: GroupId) -> Result<Vec<Article>> {
        self.articles_in_state(id, ArticleState::Processed).await
    }

    /// Filter the queue, fetch the documents concurrently, newest first.
    async fn articles_in_state(&self, id: GroupId, state: ArticleState) -> Result<Vec<Article>> {
        let group = self.load(id).await?;
        let ids = group.article_ids_in_state(state);

        let fetched = try_join_all(
            ids.into_iter()
                .map(|article_id| self.articles.find_by_id(article_id)),
        )
        .await?;

        let mut articles: Vec<Article> = fetched
            .into_iter()
            .flatten()
            .filter(|a| !a.is_deleted())
            .collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles)
    }

    // ====== Helpers ======

    async fn load(&self, id: GroupId) -> Result<Group> {
        self.groups
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("group {}", id)))
    }

    async fn ensure_user(&self, id: UserId) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user {}", id)))
    }

    async fn profiles(
        &self,
        ids: impl Iterator<Item = UserId>,
    ) -> Result<Vec<Option<UserSummary>>> {
        let users = try_join_all(ids.map(|id| self.users.find_by_id(id))).await?;
        Ok(users
            .into_iter()
            .map(|user| user.map(|u| u.summary()))
            .collect())
    }

    fn notify(&self, event: DomainEvent) {
        let name = event.event_name();
        if let Err(e) = self.publisher.publish(event) {
            tracing::warn!("Failed to publish {} event: {}", name, e);
        }
    }
}
