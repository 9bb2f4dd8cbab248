//! Per-group article moderation queue. Entries are never deleted.

use crate::domain::error::DomainError;
use crate::domain::model::{ArticleEntry, ArticleId, ArticleState, Group, UserId};
use crate::domain::permission::check_permissions;

impl Group {
    /// Queue a freshly submitted article. No dedup check.
    pub fn enqueue_article(&mut self, article: ArticleId) {
        self.articles.push(ArticleEntry {
            article,
            state: ArticleState::Pending,
        });
    }

    /// Record a moderation outcome for a queued article.
    pub fn moderate_article(
        &mut self,
        requester: UserId,
        article: ArticleId,
        outcome: ArticleState,
    ) -> Result<(), DomainError> {
        check_permissions(self, requester, None)?;

        if outcome == ArticleState::Pending {
            return Err(DomainError::Invalid(
                "moderation outcome must be processed or rejected".to_string(),
            ));
        }

        let group_id = self.id;
        let entry = self
            .articles
            .iter_mut()
            .find(|e| e.article == article)
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "article {} in queue of group {}",
                    article, group_id
                ))
            })?;
        entry.state = outcome;
        Ok(())
    }

    pub fn article_ids_in_state(&self, state: ArticleState) -> Vec<ArticleId> {
        self.articles
            .iter()
            .filter(|e| e.state == state)
            .map(|e| e.article)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AdminEntry, MembershipState, NewGroup};
    use time::OffsetDateTime;

    fn setup() -> (Group, UserId, ArticleId) {
        let owner = UserId::new();
        let mut group = Group::new(owner, NewGroup::default());
        let article = ArticleId::new();
        group.enqueue_article(article);
        (group, owner, article)
    }

    #[test]
    fn test_non_admin_cannot_moderate() {
        let (mut group, _, article) = setup();
        let member = UserId::new();
        group.request_join(member, OffsetDateTime::now_utc()).unwrap();
        group.accept_invite(member).unwrap();

        assert!(matches!(
            group.moderate_article(member, article, ArticleState::Processed),
            Err(DomainError::Forbidden(_))
        ));
        assert_eq!(group.articles[0].state, ArticleState::Pending);
    }

    #[test]
    fn test_owner_and_admin_moderate_in_place() {
        let (mut group, owner, article) = setup();
        let admin = UserId::new();
        group.administrators.push(AdminEntry {
            user: admin,
            state: MembershipState::Accepted,
            invited_at: OffsetDateTime::now_utc(),
        });
        let second = ArticleId::new();
        group.enqueue_article(second);

        group
            .moderate_article(owner, article, ArticleState::Processed)
            .unwrap();
        group
            .moderate_article(admin, second, ArticleState::Rejected)
            .unwrap();

        assert_eq!(group.articles.len(), 2);
        assert_eq!(group.article_ids_in_state(ArticleState::Processed), vec![article]);
        assert_eq!(group.article_ids_in_state(ArticleState::Rejected), vec![second]);
        assert!(group.article_ids_in_state(ArticleState::Pending).is_empty());
    }

    #[test]
    fn test_unknown_article_is_not_found() {
        let (mut group, owner, _) = setup();
        assert!(matches!(
            group.moderate_article(owner, ArticleId::new(), ArticleState::Processed),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_pending_is_not_an_outcome() {
        let (mut group, owner, article) = setup();
        assert!(matches!(
            group.moderate_article(owner, article, ArticleState::Pending),
            Err(DomainError::Invalid(_))
        ));
    }

    #[test]
    fn test_enqueue_keeps_duplicates() {
        let (mut group, _, article) = setup();
        group.enqueue_article(article);
        assert_eq!(group.article_ids_in_state(ArticleState::Pending).len(), 2);
    }
}
