use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, household::HouseholdId};
use crate::domain::services::policy;
use std::sync::Arc;
use crate::error::AppError;

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    let members = state.member_repo.list_by_household(&household_id).await?;
    Ok(Json(members))
}
