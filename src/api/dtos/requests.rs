use serde::Deserialize;

use crate::domain::models::stock::{RestockTarget, StockChangeType};

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateHouseholdRequest {
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateHouseholdRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateInvitationRequest {
    /// Role granted on acceptance; defaults to `member`.
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct RedeemInvitationRequest {
    pub code: String,
}

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub photo: Option<String>,
    pub current_stock: i64,
    pub min_recommended: i64,
    pub ideal_amount: i64,
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub photo: Option<String>,
    pub min_recommended: Option<i64>,
    pub ideal_amount: Option<i64>,
}

#[derive(Deserialize)]
pub struct StockChangeRequest {
    pub amount: i64,
    pub change_type: StockChangeType,
}

#[derive(Deserialize)]
pub struct RestockRequest {
    pub target: RestockTarget,
}
