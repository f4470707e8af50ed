use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateHouseholdRequest, UpdateHouseholdRequest};
use crate::api::extractors::{auth::AuthUser, household::HouseholdId};
use crate::domain::models::{household::Household, member::{HouseholdMember, MemberRole}};
use crate::domain::services::policy;
use std::sync::Arc;
use chrono::Utc;
use crate::error::AppError;
use tracing::info;

pub async fn list_households(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let households = state.household_repo.list_for_user(&user.id).await?;
    Ok(Json(households))
}

pub async fn create_household(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateHouseholdRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Household name must not be empty".into()));
    }

    let household = Household::new(name.to_string(), payload.icon, user.id.clone());
    let owner = HouseholdMember::new(household.id.clone(), user.id, MemberRole::Owner);
    let created = state.household_repo.create_with_owner(&household, &owner).await?;

    info!("Household created: {}", created.id);
    Ok(Json(created))
}

pub async fn get_household(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    let household = state.household_repo.find_by_id(&household_id).await?
        .ok_or(AppError::NotFound("Household not found".into()))?;
    Ok(Json(household))
}

pub async fn update_household(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
    Json(payload): Json<UpdateHouseholdRequest>,
) -> Result<impl IntoResponse, AppError> {
    let membership = policy::require_membership(&state.member_repo, &household_id, &user.id).await?;
    if !policy::can_edit_household(membership.role()) {
        return Err(AppError::Forbidden("Only owners and admins can edit the household".into()));
    }

    let mut household = state.household_repo.find_by_id(&household_id).await?
        .ok_or(AppError::NotFound("Household not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Household name must not be empty".into()));
        }
        household.name = name;
    }
    if let Some(icon) = payload.icon {
        household.description = Some(icon);
    }
    household.updated_at = Utc::now();

    let updated = state.household_repo.update(&household).await?;
    info!("Household updated: {}", household_id);
    Ok(Json(updated))
}

pub async fn delete_household(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let membership = policy::require_membership(&state.member_repo, &household_id, &user.id).await?;
    if !policy::can_delete_household(membership.role()) {
        return Err(AppError::Forbidden("Only the owner can delete the household".into()));
    }

    state.household_repo.delete(&household_id).await?;

    info!("Household deleted: {}", household_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

pub async fn leave_household(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let membership = policy::require_membership(&state.member_repo, &household_id, &user.id).await?;
    if !policy::can_leave_household(membership.role()) {
        return Err(AppError::Forbidden("Owners cannot leave; delete the household instead".into()));
    }

    state.member_repo.delete(&household_id, &user.id).await?;

    info!("User {} left household {}", user.id, household_id);
    Ok(Json(serde_json::json!({ "status": "left" })))
}
