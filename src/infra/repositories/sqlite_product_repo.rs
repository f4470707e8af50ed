use crate::domain::{
    models::product::Product,
    models::stock::{RestockTarget, StockChangeOutcome, StockChangeType},
    ports::ProductRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteProductRepo {
    pool: SqlitePool,
}

impl SqliteProductRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepo {
    async fn create(&self, product: &Product) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (id, name, photo, current_stock, min_recommended, ideal_amount, user_id, household_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.photo)
            .bind(product.current_stock)
            .bind(product.min_recommended)
            .bind(product.ideal_amount)
            .bind(&product.user_id)
            .bind(&product.household_id)
            .bind(product.created_at)
            .bind(product.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, household_id: &str, id: &str) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE household_id = ? AND id = ?"
        )
            .bind(household_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_household(&self, household_id: &str) -> Result<Vec<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE household_id = ? ORDER BY name"
        )
            .bind(household_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = ?, photo = ?, min_recommended = ?, ideal_amount = ?, updated_at = ?
             WHERE household_id = ? AND id = ? RETURNING *"
        )
            .bind(&product.name)
            .bind(&product.photo)
            .bind(product.min_recommended)
            .bind(product.ideal_amount)
            .bind(Utc::now())
            .bind(&product.household_id)
            .bind(&product.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, household_id: &str, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM products WHERE household_id = ? AND id = ?")
            .bind(household_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn apply_stock_change(
        &self,
        household_id: &str,
        product_id: &str,
        amount: i64,
        change_type: StockChangeType,
    ) -> Result<StockChangeOutcome, AppError> {
        // SQLite serializes writers, so the read inside the write
        // transaction cannot observe a stale value.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let previous_stock: i64 = sqlx::query_scalar(
            "SELECT current_stock FROM products WHERE household_id = ? AND id = ?"
        )
            .bind(household_id)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

        let new_stock = change_type
            .apply(previous_stock, amount)
            .ok_or_else(|| AppError::Validation("Stock change out of range".into()))?;

        sqlx::query(
            "UPDATE products SET current_stock = ?, updated_at = ? WHERE household_id = ? AND id = ?"
        )
            .bind(new_stock)
            .bind(Utc::now())
            .bind(household_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(StockChangeOutcome { previous_stock, new_stock })
    }

    async fn restock_to_target(
        &self,
        household_id: &str,
        product_id: &str,
        target: RestockTarget,
    ) -> Result<StockChangeOutcome, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let (previous_stock, min_recommended, ideal_amount): (i64, i64, i64) = sqlx::query_as(
            "SELECT current_stock, min_recommended, ideal_amount FROM products WHERE household_id = ? AND id = ?"
        )
            .bind(household_id)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

        let target_level = match target {
            RestockTarget::Min => min_recommended,
            RestockTarget::Ideal => ideal_amount,
        };
        let new_stock = previous_stock.max(target_level);

        if new_stock != previous_stock {
            sqlx::query(
                "UPDATE products SET current_stock = ?, updated_at = ? WHERE household_id = ? AND id = ?"
            )
                .bind(new_stock)
                .bind(Utc::now())
                .bind(household_id)
                .bind(product_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(StockChangeOutcome { previous_stock, new_stock })
    }
}
