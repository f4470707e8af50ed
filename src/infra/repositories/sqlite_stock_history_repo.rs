use crate::domain::{models::stock::StockHistoryEntry, ports::StockHistoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteStockHistoryRepo {
    pool: SqlitePool,
}

impl SqliteStockHistoryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockHistoryRepository for SqliteStockHistoryRepo {
    async fn append(&self, entry: &StockHistoryEntry) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO stock_history (id, product_id, change_amount, change_type, previous_stock, new_stock, user_id, household_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&entry.id)
            .bind(&entry.product_id)
            .bind(entry.change_amount)
            .bind(&entry.change_type)
            .bind(entry.previous_stock)
            .bind(entry.new_stock)
            .bind(&entry.user_id)
            .bind(&entry.household_id)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
