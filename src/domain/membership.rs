//! Member lifecycle: pending -> accepted, or removed on reject/revoke.

use crate::domain::error::DomainError;
use crate::domain::model::{Group, MemberEntry, MembershipState, UserId};
use crate::domain::permission::check_permissions;
use time::OffsetDateTime;

impl Group {
    /// Append a pending entry for `user`.
    pub fn request_join(&mut self, user: UserId, now: OffsetDateTime) -> Result<(), DomainError> {
        self.ensure_can_hold_membership(user)?;
        self.push_pending_member(user, now);
        Ok(())
    }

    /// Invite `target` on behalf of any participant of the group.
    pub fn invite_member(
        &mut self,
        inviter: UserId,
        target: UserId,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if !self.is_participant(inviter) {
            return Err(DomainError::Forbidden(format!(
                "user {} cannot invite to group {}",
                inviter, self.id
            )));
        }
        self.ensure_can_hold_membership(target)?;
        self.push_pending_member(target, now);
        Ok(())
    }

    pub fn revoke_join_request(&mut self, user: UserId) -> Result<(), DomainError> {
        let index = self.pending_member_index(user)?;
        self.members.remove(index);
        Ok(())
    }

    pub fn accept_invite(&mut self, user: UserId) -> Result<(), DomainError> {
        let index = self.pending_member_index(user)?;
        self.members[index].state = MembershipState::Accepted;
        Ok(())
    }

    /// Rejected entries are dropped rather than retained.
    pub fn reject_invite(&mut self, user: UserId) -> Result<(), DomainError> {
        let index = self.pending_member_index(user)?;
        self.members.remove(index);
        Ok(())
    }

    /// Voluntary departure. Also drops any administrator entry.
    pub fn leave(&mut self, user: UserId) -> Result<(), DomainError> {
        if self.is_owner(user) {
            return Err(DomainError::Forbidden(
                "the group owner cannot leave the group".to_string(),
            ));
        }
        let index = self
            .members
            .iter()
            .position(|m| m.user == user && m.state == MembershipState::Accepted)
            .ok_or_else(|| {
                DomainError::NotFound(format!("member {} in group {}", user, self.id))
            })?;
        self.members.remove(index);
        self.remove_admin_role(user);
        Ok(())
    }

    /// Remove `target`'s member entry and administrator entry. The caller is
    /// responsible for soft-deleting the target's articles.
    pub fn remove_member(&mut self, requester: UserId, target: UserId) -> Result<(), DomainError> {
        check_permissions(self, requester, Some(target))?;

        let index = self
            .members
            .iter()
            .position(|m| m.user == target)
            .ok_or_else(|| {
                DomainError::NotFound(format!("member {} in group {}", target, self.id))
            })?;
        self.members.remove(index);
        self.remove_admin_role(target);
        Ok(())
    }

    fn ensure_can_hold_membership(&mut self, user: UserId) -> Result<(), DomainError> {
        if self.is_owner(user) {
            return Err(DomainError::Conflict(format!(
                "user {} owns group {}",
                user, self.id
            )));
        }
        let current = self.member(user).map(|m| m.state);
        match current {
            Some(MembershipState::Pending) => Err(DomainError::Conflict(format!(
                "user {} already has a pending request in group {}",
                user, self.id
            ))),
            Some(MembershipState::Accepted) => Err(DomainError::Conflict(format!(
                "user {} is already a member of group {}",
                user, self.id
            ))),
            Some(MembershipState::Rejected) => {
                // stale entry from an older document; one entry per user
                self.members.retain(|m| m.user != user);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn push_pending_member(&mut self, user: UserId, now: OffsetDateTime) {
        self.members.push(MemberEntry {
            user,
            state: MembershipState::Pending,
            joined_at: now,
        });
    }

    fn pending_member_index(&self, user: UserId) -> Result<usize, DomainError> {
        self.members
            .iter()
            .position(|m| m.user == user && m.state == MembershipState::Pending)
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "pending membership for {} in group {}",
                    user, self.id
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AdminEntry, NewGroup};

    fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn new_group() -> (Group, UserId) {
        let owner = UserId::new();
        (Group::new(owner, NewGroup::default()), owner)
    }

    fn make_admin(group: &mut Group, user: UserId) {
        group.request_join(user, now()).unwrap();
        group.accept_invite(user).unwrap();
        group.administrators.push(AdminEntry {
            user,
            state: MembershipState::Accepted,
            invited_at: now(),
        });
    }

    #[test]
    fn test_join_then_accept_then_duplicate_join() {
        let (mut group, _) = new_group();
        let user = UserId::new();

        group.request_join(user, now()).unwrap();
        group.accept_invite(user).unwrap();
        assert_eq!(group.member(user).unwrap().state, MembershipState::Accepted);

        let err = group.request_join(user, now()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(group.members.len(), 1);
    }

    #[test]
    fn test_duplicate_pending_request_conflicts() {
        let (mut group, _) = new_group();
        let user = UserId::new();
        group.request_join(user, now()).unwrap();
        assert!(matches!(
            group.request_join(user, now()),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_owner_cannot_request_join() {
        let (mut group, owner) = new_group();
        assert!(matches!(
            group.request_join(owner, now()),
            Err(DomainError::Conflict(_))
        ));
        assert!(group.members.is_empty());
    }

    #[test]
    fn test_stale_rejected_entry_is_replaced() {
        let (mut group, _) = new_group();
        let user = UserId::new();
        group.members.push(MemberEntry {
            user,
            state: MembershipState::Rejected,
            joined_at: now(),
        });

        group.request_join(user, now()).unwrap();
        assert_eq!(group.members.len(), 1);
        assert_eq!(group.member(user).unwrap().state, MembershipState::Pending);
    }

    #[test]
    fn test_revoke_only_touches_pending() {
        let (mut group, _) = new_group();
        let user = UserId::new();
        assert!(matches!(
            group.revoke_join_request(user),
            Err(DomainError::NotFound(_))
        ));

        group.request_join(user, now()).unwrap();
        group.revoke_join_request(user).unwrap();
        assert!(group.member(user).is_none());

        group.request_join(user, now()).unwrap();
        group.accept_invite(user).unwrap();
        assert!(group.revoke_join_request(user).is_err());
        assert!(group.is_accepted_member(user));
    }

    #[test]
    fn test_reject_removes_entry_and_requires_pending() {
        let (mut group, _) = new_group();
        let user = UserId::new();
        group.request_join(user, now()).unwrap();
        group.reject_invite(user).unwrap();
        assert!(group.members.is_empty());
        assert!(matches!(
            group.reject_invite(user),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_invite_requires_participant() {
        let (mut group, owner) = new_group();
        let member = UserId::new();
        let stranger = UserId::new();
        let guest = UserId::new();

        group.invite_member(owner, member, now()).unwrap();
        group.accept_invite(member).unwrap();
        group.invite_member(member, guest, now()).unwrap();
        assert_eq!(group.member(guest).unwrap().state, MembershipState::Pending);

        assert!(matches!(
            group.invite_member(stranger, UserId::new(), now()),
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            group.invite_member(owner, guest, now()),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_owner_removes_admin_from_both_collections() {
        let (mut group, owner) = new_group();
        let admin = UserId::new();
        make_admin(&mut group, admin);

        group.remove_member(owner, admin).unwrap();
        assert!(group.member(admin).is_none());
        assert!(group.administrator(admin).is_none());
    }

    #[test]
    fn test_admin_cannot_remove_admin() {
        let (mut group, _) = new_group();
        let admin_a = UserId::new();
        let admin_b = UserId::new();
        make_admin(&mut group, admin_a);
        make_admin(&mut group, admin_b);

        assert!(matches!(
            group.remove_member(admin_a, admin_b),
            Err(DomainError::Forbidden(_))
        ));
        assert!(group.is_accepted_member(admin_b));
    }

    #[test]
    fn test_admin_removes_member_and_member_cannot() {
        let (mut group, _) = new_group();
        let admin = UserId::new();
        let member = UserId::new();
        let other = UserId::new();
        make_admin(&mut group, admin);
        for user in [member, other] {
            group.request_join(user, now()).unwrap();
            group.accept_invite(user).unwrap();
        }

        assert!(matches!(
            group.remove_member(member, other),
            Err(DomainError::Forbidden(_))
        ));
        group.remove_member(admin, member).unwrap();
        assert!(group.member(member).is_none());
    }

    #[test]
    fn test_remove_absent_member_is_not_found() {
        let (mut group, owner) = new_group();
        assert!(matches!(
            group.remove_member(owner, UserId::new()),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_leave_drops_admin_role_but_owner_cannot_leave() {
        let (mut group, owner) = new_group();
        let admin = UserId::new();
        make_admin(&mut group, admin);

        group.leave(admin).unwrap();
        assert!(group.member(admin).is_none());
        assert!(group.administrator(admin).is_none());

        assert!(matches!(group.leave(owner), Err(DomainError::Forbidden(_))));
        assert!(matches!(
            group.leave(UserId::new()),
            Err(DomainError::NotFound(_))
        ));
    }
}
