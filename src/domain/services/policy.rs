use std::sync::Arc;

use crate::domain::models::member::{HouseholdMember, MemberRole};
use crate::domain::ports::MemberRepository;
use crate::error::AppError;

/// Flat role permission set. The client UI hides buttons, but these checks
/// are the actual security boundary.
pub fn can_edit_household(role: MemberRole) -> bool {
    matches!(role, MemberRole::Owner | MemberRole::Admin)
}

pub fn can_delete_household(role: MemberRole) -> bool {
    role == MemberRole::Owner
}

pub fn can_invite(role: MemberRole) -> bool {
    matches!(role, MemberRole::Owner | MemberRole::Admin)
}

/// Owners cannot leave; they must delete the household instead.
pub fn can_leave_household(role: MemberRole) -> bool {
    role != MemberRole::Owner
}

/// Caller's membership row, or Forbidden if they do not belong to the
/// household.
pub async fn require_membership(
    members: &Arc<dyn MemberRepository>,
    household_id: &str,
    user_id: &str,
) -> Result<HouseholdMember, AppError> {
    members
        .find(household_id, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("Not a member of this household".into()))
}
