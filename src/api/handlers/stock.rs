use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{RestockRequest, StockChangeRequest},
    responses::StockChangeResponse,
};
use crate::api::extractors::{auth::AuthUser, household::HouseholdId};
use crate::domain::models::stock::{StockChangeType, StockHistoryEntry};
use crate::domain::services::policy;
use std::sync::Arc;
use crate::error::AppError;
use tracing::{info, warn};

pub async fn apply_stock_change(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
    Path((_, product_id)): Path<(String, String)>,
    Json(payload): Json<StockChangeRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    match payload.change_type {
        StockChangeType::Add | StockChangeType::Remove if payload.amount <= 0 => {
            return Err(AppError::Validation("Amount must be positive".into()));
        }
        StockChangeType::Adjust if payload.amount < 0 => {
            return Err(AppError::Validation("Adjusted stock must not be negative".into()));
        }
        _ => {}
    }

    let outcome = state
        .product_repo
        .apply_stock_change(&household_id, &product_id, payload.amount, payload.change_type)
        .await?;

    record_history(&state, &household_id, &product_id, payload.amount, payload.change_type, outcome.previous_stock, outcome.new_stock, &user.id).await;

    info!(
        "Stock change on product {}: {} -> {}",
        product_id, outcome.previous_stock, outcome.new_stock
    );

    Ok(Json(StockChangeResponse {
        product_id,
        previous_stock: outcome.previous_stock,
        new_stock: outcome.new_stock,
    }))
}

/// "Buy to minimum / buy to ideal" quick action. The repository computes
/// the shortfall under the same transaction that applies it, so the result
/// lands exactly on the target.
pub async fn restock(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
    Path((_, product_id)): Path<(String, String)>,
    Json(payload): Json<RestockRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    let outcome = state
        .product_repo
        .restock_to_target(&household_id, &product_id, payload.target)
        .await?;

    let amount = outcome.new_stock - outcome.previous_stock;
    if amount > 0 {
        record_history(&state, &household_id, &product_id, amount, StockChangeType::Add, outcome.previous_stock, outcome.new_stock, &user.id).await;
    }

    Ok(Json(StockChangeResponse {
        product_id,
        previous_stock: outcome.previous_stock,
        new_stock: outcome.new_stock,
    }))
}

/// Best-effort audit append; a failed write must not undo an applied
/// stock change.
#[allow(clippy::too_many_arguments)]
async fn record_history(
    state: &Arc<AppState>,
    household_id: &str,
    product_id: &str,
    amount: i64,
    change_type: StockChangeType,
    previous_stock: i64,
    new_stock: i64,
    user_id: &str,
) {
    let entry = StockHistoryEntry::new(
        product_id.to_string(),
        amount,
        change_type,
        previous_stock,
        new_stock,
        user_id.to_string(),
        household_id.to_string(),
    );

    if let Err(e) = state.stock_history_repo.append(&entry).await {
        warn!("Failed to record stock history for product {}: {:?}", product_id, e);
    }
}
