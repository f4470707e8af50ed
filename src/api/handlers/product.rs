use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::{CreateProductRequest, UpdateProductRequest}, responses::ProductWithShortfalls};
use crate::api::extractors::{auth::AuthUser, household::HouseholdId};
use crate::domain::models::product::Product;
use crate::domain::services::{policy, shopping};
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn list_products(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    let products = state.product_repo.list_by_household(&household_id).await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Product name must not be empty".into()));
    }
    if payload.min_recommended < 0 || payload.ideal_amount < 0 {
        return Err(AppError::Validation("Thresholds must not be negative".into()));
    }

    let product = Product::new(
        name.to_string(),
        payload.photo,
        payload.current_stock,
        payload.min_recommended,
        payload.ideal_amount,
        user.id,
        household_id,
    );
    let created = state.product_repo.create(&product).await?;

    info!("Product created: {}", created.id);
    Ok(Json(created))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
    Path((_, product_id)): Path<(String, String)>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    let mut product = state.product_repo.find_by_id(&household_id, &product_id).await?
        .ok_or(AppError::NotFound("Product not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Product name must not be empty".into()));
        }
        product.name = name;
    }
    if let Some(photo) = payload.photo {
        product.photo = Some(photo);
    }
    if let Some(min) = payload.min_recommended {
        if min < 0 {
            return Err(AppError::Validation("Thresholds must not be negative".into()));
        }
        product.min_recommended = min;
    }
    if let Some(ideal) = payload.ideal_amount {
        if ideal < 0 {
            return Err(AppError::Validation("Thresholds must not be negative".into()));
        }
        product.ideal_amount = ideal;
    }

    let updated = state.product_repo.update(&product).await?;
    info!("Product updated: {}", product_id);
    Ok(Json(updated))
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
    Path((_, product_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    state.product_repo.find_by_id(&household_id, &product_id).await?
        .ok_or(AppError::NotFound("Product not found".into()))?;

    state.product_repo.delete(&household_id, &product_id).await?;
    info!("Product deleted: {}", product_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

pub async fn shopping_list(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    let products = state.product_repo.list_by_household(&household_id).await?;
    let list: Vec<ProductWithShortfalls> = shopping::shopping_list(products)
        .into_iter()
        .map(ProductWithShortfalls::from)
        .collect();
    Ok(Json(list))
}

pub async fn low_stock(
    State(state): State<Arc<AppState>>,
    HouseholdId(household_id): HouseholdId,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    policy::require_membership(&state.member_repo, &household_id, &user.id).await?;

    let products = state.product_repo.list_by_household(&household_id).await?;
    let list: Vec<ProductWithShortfalls> = shopping::low_stock(products)
        .into_iter()
        .map(ProductWithShortfalls::from)
        .collect();
    Ok(Json(list))
}
