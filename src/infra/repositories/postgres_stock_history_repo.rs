use crate::domain::{models::stock::StockHistoryEntry, ports::StockHistoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresStockHistoryRepo {
    pool: PgPool,
}

impl PostgresStockHistoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockHistoryRepository for PostgresStockHistoryRepo {
    async fn append(&self, entry: &StockHistoryEntry) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO stock_history (id, product_id, change_amount, change_type, previous_stock, new_stock, user_id, household_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
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
