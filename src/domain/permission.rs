//! Role check run before every mutating operation that acts on another user.

use crate::domain::error::DomainError;
use crate::domain::model::{Group, UserId};

/// Decide whether `requester` may act on `target` (or on the group itself when
/// `target` is `None`).
///
/// - The owner is always allowed.
/// - An accepted administrator is allowed, except against another accepted
///   administrator or against the owner.
/// - Everyone else is forbidden.
pub fn check_permissions(
    group: &Group,
    requester: UserId,
    target: Option<UserId>,
) -> Result<(), DomainError> {
    if group.is_owner(requester) {
        return Ok(());
    }

    if group.is_accepted_admin(requester) {
        return match target {
            Some(target) if group.is_owner(target) => Err(DomainError::Forbidden(
                "the group owner cannot be targeted".to_string(),
            )),
            Some(target) if group.is_accepted_admin(target) => Err(DomainError::Forbidden(
                "administrators cannot act on each other".to_string(),
            )),
            _ => Ok(()),
        };
    }

    Err(DomainError::Forbidden(format!(
        "user {} has no authority in group {}",
        requester, group.id
    )))
}
