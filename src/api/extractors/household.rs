use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use std::collections::HashMap;
use crate::state::AppState;
use std::sync::Arc;

/// Path-scoped household id, verified to exist. Membership and role gates
/// are checked in the handlers where they matter.
pub struct HouseholdId(pub String);

impl FromRequestParts<Arc<AppState>> for HouseholdId {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        let household_id = params.get("household_id").ok_or(StatusCode::BAD_REQUEST)?;

        match state.household_repo.find_by_id(household_id).await {
            Ok(Some(_)) => Ok(HouseholdId(household_id.clone())),
            Ok(None) => Err(StatusCode::NOT_FOUND),
            Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
