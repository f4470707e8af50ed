use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::product::Product;

#[derive(Serialize)]
pub struct InvitationResponse {
    pub id: String,
    pub household_id: String,
    pub role: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    /// Countdown seed for the inviter's modal; recomputed client-side
    /// once per second.
    pub seconds_remaining: i64,
}

#[derive(Serialize)]
pub struct StockChangeResponse {
    pub product_id: String,
    pub previous_stock: i64,
    pub new_stock: i64,
}

/// Product plus its derived restock quantities, used by the shopping-list
/// and low-stock views.
#[derive(Serialize)]
pub struct ProductWithShortfalls {
    #[serde(flatten)]
    pub product: Product,
    pub is_low_stock: bool,
    pub needs_min: bool,
    pub needs_ideal: bool,
    pub shortfall_to_min: i64,
    pub shortfall_to_ideal: i64,
}

impl From<Product> for ProductWithShortfalls {
    fn from(product: Product) -> Self {
        Self {
            is_low_stock: product.is_low_stock(),
            needs_min: product.needs_min(),
            needs_ideal: product.needs_ideal(),
            shortfall_to_min: product.shortfall_to_min(),
            shortfall_to_ideal: product.shortfall_to_ideal(),
            product,
        }
    }
}
