use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockChangeType {
    Add,
    Remove,
    Adjust,
}

impl StockChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockChangeType::Add => "add",
            StockChangeType::Remove => "remove",
            StockChangeType::Adjust => "adjust",
        }
    }

    /// `amount` is a magnitude for add/remove and an absolute value for
    /// adjust. No clamp: negative stock is permitted. `None` means the
    /// change would overflow an i64.
    pub fn apply(&self, current: i64, amount: i64) -> Option<i64> {
        match self {
            StockChangeType::Add => current.checked_add(amount),
            StockChangeType::Remove => current.checked_sub(amount),
            StockChangeType::Adjust => Some(amount),
        }
    }
}

/// Stock level a restock quick-action fills up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestockTarget {
    Min,
    Ideal,
}

/// What a stock mutation observed and produced, read under the same
/// transaction that applied it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StockChangeOutcome {
    pub previous_stock: i64,
    pub new_stock: i64,
}

/// Append-only audit row. Written on every accepted stock change, never
/// read back by any endpoint.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct StockHistoryEntry {
    pub id: String,
    pub product_id: String,
    pub change_amount: i64,
    pub change_type: String,
    pub previous_stock: i64,
    pub new_stock: i64,
    pub user_id: String,
    pub household_id: String,
    pub created_at: DateTime<Utc>,
}

impl StockHistoryEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product_id: String,
        change_amount: i64,
        change_type: StockChangeType,
        previous_stock: i64,
        new_stock: i64,
        user_id: String,
        household_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id,
            change_amount,
            change_type: change_type.as_str().to_string(),
            previous_stock,
            new_stock,
            user_id,
            household_id,
            created_at: Utc::now(),
        }
    }
}
