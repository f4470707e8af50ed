use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::{CreateInvitationRequest, RedeemInvitationRequest}, responses::InvitationResponse};
use crate::api::extractors::{auth::AuthUser, household::HouseholdId};
use crate::domain::models::member::MemberRole;
use crate::domain::services::policy;
use std::sync::Arc;
use chrono::Utc;
use crate::error::AppError;

pub async fn create_invitation(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
    Json(payload): Json<CreateInvitationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let membership = policy::require_membership(&state.member_repo, &household_id, &user.id).await?;
    if !policy::can_invite(membership.role()) {
        return Err(AppError::Forbidden("Only owners and admins can invite".into()));
    }

    let role = match payload.role.as_deref() {
        None => MemberRole::Member,
        Some("member") => MemberRole::Member,
        Some("admin") => MemberRole::Admin,
        Some(other) => {
            return Err(AppError::Validation(format!("Cannot invite with role '{}'", other)));
        }
    };

    let invitation = state.invitation_service.generate(&household_id, &user.id, role).await?;

    let seconds_remaining = invitation.seconds_remaining(Utc::now());
    Ok(Json(InvitationResponse {
        id: invitation.id,
        household_id: invitation.household_id,
        role: invitation.role,
        code: invitation.code,
        expires_at: invitation.expires_at,
        seconds_remaining,
    }))
}

pub async fn redeem_invitation(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<RedeemInvitationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let household = state.invitation_service.redeem(&payload.code, &user.id).await?;
    Ok(Json(household))
}
