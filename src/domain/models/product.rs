use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
    pub current_stock: i64,
    pub min_recommended: i64,
    pub ideal_amount: i64,
    pub user_id: String,
    pub household_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: String,
        photo: Option<String>,
        current_stock: i64,
        min_recommended: i64,
        ideal_amount: i64,
        user_id: String,
        household_id: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            photo,
            current_stock,
            min_recommended,
            ideal_amount,
            user_id,
            household_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Low-stock badge. Inclusive comparison, distinct on purpose from
    /// [`Product::needs_min`] which is strict; downstream views rely on
    /// each independently.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_recommended
    }

    pub fn needs_min(&self) -> bool {
        self.current_stock < self.min_recommended
    }

    pub fn needs_ideal(&self) -> bool {
        self.current_stock < self.ideal_amount
    }

    pub fn shortfall_to_min(&self) -> i64 {
        (self.min_recommended - self.current_stock).max(0)
    }

    pub fn shortfall_to_ideal(&self) -> i64 {
        (self.ideal_amount - self.current_stock).max(0)
    }
}
