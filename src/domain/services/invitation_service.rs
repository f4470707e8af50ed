use std::sync::Arc;
use chrono::Utc;
use tracing::info;

use crate::domain::models::{
    household::Household,
    invitation::{HouseholdInvitation, CODE_LEN},
    member::{HouseholdMember, MemberRole},
};
use crate::domain::ports::{HouseholdRepository, InvitationRepository, MemberRepository};
use crate::error::AppError;

pub struct InvitationService {
    invitations: Arc<dyn InvitationRepository>,
    members: Arc<dyn MemberRepository>,
    households: Arc<dyn HouseholdRepository>,
    ttl_minutes: i64,
}

impl InvitationService {
    pub fn new(
        invitations: Arc<dyn InvitationRepository>,
        members: Arc<dyn MemberRepository>,
        households: Arc<dyn HouseholdRepository>,
        ttl_minutes: i64,
    ) -> Self {
        Self { invitations, members, households, ttl_minutes }
    }

    /// Find-or-create: at most one active invitation exists per
    /// (household, inviter) pair, so re-requesting before expiry returns
    /// the same code.
    pub async fn generate(
        &self,
        household_id: &str,
        inviter_id: &str,
        role: MemberRole,
    ) -> Result<HouseholdInvitation, AppError> {
        if let Some(existing) = self
            .invitations
            .find_active_by_inviter(household_id, inviter_id, Utc::now())
            .await?
        {
            return Ok(existing);
        }

        let invitation = HouseholdInvitation::new(
            household_id.to_string(),
            inviter_id.to_string(),
            role,
            self.ttl_minutes,
        );
        let created = self.invitations.create(&invitation).await?;
        info!("Invitation {} created for household {}", created.id, household_id);
        Ok(created)
    }

    /// Code must match an unaccepted, unexpired invitation and the redeemer
    /// must not already belong to the household. Membership insert and
    /// acceptance stamp land in one transaction.
    pub async fn redeem(&self, code: &str, user_id: &str) -> Result<Household, AppError> {
        let code = code.trim().to_uppercase();
        if code.len() != CODE_LEN {
            return Err(AppError::Validation("Invitation code must be 6 characters".into()));
        }

        let now = Utc::now();
        let invitation = self
            .invitations
            .find_redeemable(&code, now)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid or expired invitation code".into()))?;

        if self.members.find(&invitation.household_id, user_id).await?.is_some() {
            return Err(AppError::Conflict("Already a member of this household".into()));
        }

        let member = HouseholdMember::new(
            invitation.household_id.clone(),
            user_id.to_string(),
            invitation.role(),
        );
        self.invitations.accept(&invitation.id, &member, now).await?;

        info!(
            "User {} joined household {} via invitation {}",
            user_id, invitation.household_id, invitation.id
        );

        self.households
            .find_by_id(&invitation.household_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Household not found".into()))
    }
}
