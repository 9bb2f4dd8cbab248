//! Administrator invitations. Independent of the member lifecycle except that
//! only an accepted member can be invited.

use crate::domain::error::DomainError;
use crate::domain::model::{AdminEntry, Group, MembershipState, UserId};
use time::OffsetDateTime;

impl Group {
    pub fn invite_admin(
        &mut self,
        requester: UserId,
        target: UserId,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.ensure_owner(requester, "invite administrators")?;

        if self.is_owner(target) {
            return Err(DomainError::Conflict(
                "the group owner already holds full authority".to_string(),
            ));
        }
        if !self.is_accepted_member(target) {
            return Err(DomainError::Conflict(format!(
                "user {} is not an accepted member of group {}",
                target, self.id
            )));
        }
        // Any entry blocks, including a rejected one.
        if self.administrator(target).is_some() {
            return Err(DomainError::Conflict(format!(
                "user {} already has an administrator entry in group {}",
                target, self.id
            )));
        }

        self.administrators.push(AdminEntry {
            user: target,
            state: MembershipState::Pending,
            invited_at: now,
        });
        Ok(())
    }

    pub fn accept_admin_invite(&mut self, user: UserId) -> Result<(), DomainError> {
        let index = self.pending_admin_index(user)?;
        self.administrators[index].state = MembershipState::Accepted;
        Ok(())
    }

    pub fn reject_admin_invite(&mut self, user: UserId) -> Result<(), DomainError> {
        let index = self.pending_admin_index(user)?;
        self.administrators.remove(index);
        Ok(())
    }

    pub fn cancel_admin_invite(
        &mut self,
        requester: UserId,
        target: UserId,
    ) -> Result<(), DomainError> {
        self.ensure_owner(requester, "cancel administrator invitations")?;
        let index = self.pending_admin_index(target)?;
        self.administrators.remove(index);
        Ok(())
    }

    /// Drop every administrator entry for `user`, whatever its state.
    /// Returns whether anything was removed.
    pub fn remove_admin_role(&mut self, user: UserId) -> bool {
        let before = self.administrators.len();
        self.administrators.retain(|a| a.user != user);
        self.administrators.len() != before
    }

    fn ensure_owner(&self, requester: UserId, action: &str) -> Result<(), DomainError> {
        if self.is_owner(requester) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "only the owner of group {} may {}",
                self.id, action
            )))
        }
    }

    fn pending_admin_index(&self, user: UserId) -> Result<usize, DomainError> {
        self.administrators
            .iter()
            .position(|a| a.user == user && a.state == MembershipState::Pending)
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "pending administrator invitation for {} in group {}",
                    user, self.id
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NewGroup;

    fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    /// Group with an owner and one accepted member
    fn setup() -> (Group, UserId, UserId) {
        let owner = UserId::new();
        let member = UserId::new();
        let mut group = Group::new(owner, NewGroup::default());
        group.request_join(member, now()).unwrap();
        group.accept_invite(member).unwrap();
        (group, owner, member)
    }

    #[test]
    fn test_only_owner_may_invite() {
        let (mut group, _, member) = setup();
        let other = UserId::new();
        group.request_join(other, now()).unwrap();
        group.accept_invite(other).unwrap();

        assert!(matches!(
            group.invite_admin(member, other, now()),
            Err(DomainError::Forbidden(_))
        ));
        assert!(group.administrators.is_empty());
    }

    #[test]
    fn test_invite_requires_accepted_member() {
        let (mut group, owner, _) = setup();
        let applicant = UserId::new();
        group.request_join(applicant, now()).unwrap();

        assert!(matches!(
            group.invite_admin(owner, applicant, now()),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            group.invite_admin(owner, UserId::new(), now()),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            group.invite_admin(owner, owner, now()),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_any_existing_entry_blocks_reinvite() {
        let (mut group, owner, member) = setup();
        group.invite_admin(owner, member, now()).unwrap();
        assert!(matches!(
            group.invite_admin(owner, member, now()),
            Err(DomainError::Conflict(_))
        ));

        group.administrators[0].state = MembershipState::Rejected;
        assert!(matches!(
            group.invite_admin(owner, member, now()),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_accept_flips_state() {
        let (mut group, owner, member) = setup();
        group.invite_admin(owner, member, now()).unwrap();
        group.accept_admin_invite(member).unwrap();
        assert!(group.is_accepted_admin(member));

        // accepted is not pending
        assert!(matches!(
            group.accept_admin_invite(member),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_reject_twice_is_not_found() {
        let (mut group, owner, member) = setup();
        group.invite_admin(owner, member, now()).unwrap();

        group.reject_admin_invite(member).unwrap();
        assert!(group.administrator(member).is_none());
        assert!(matches!(
            group.reject_admin_invite(member),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_invite_then_cancel_restores_initial_state() {
        let (mut group, owner, member) = setup();
        let before = group.clone();

        group.invite_admin(owner, member, now()).unwrap();
        group.cancel_admin_invite(owner, member).unwrap();

        assert_eq!(group, before);
        assert!(matches!(
            group.cancel_admin_invite(owner, member),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_cancel_is_owner_only() {
        let (mut group, owner, member) = setup();
        group.invite_admin(owner, member, now()).unwrap();
        assert!(matches!(
            group.cancel_admin_invite(member, member),
            Err(DomainError::Forbidden(_))
        ));
        assert!(group.administrator(member).is_some());
    }

    #[test]
    fn test_remove_admin_role_reports_presence() {
        let (mut group, owner, member) = setup();
        assert!(!group.remove_admin_role(member));

        group.invite_admin(owner, member, now()).unwrap();
        group.accept_admin_invite(member).unwrap();
        assert!(group.remove_admin_role(member));
        assert!(group.administrator(member).is_none());
        // membership untouched
        assert!(group.is_accepted_member(member));
    }
}
