use crate::domain::{
    models::{household::Household, member::HouseholdMember},
    ports::HouseholdRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteHouseholdRepo {
    pool: SqlitePool,
}

impl SqliteHouseholdRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HouseholdRepository for SqliteHouseholdRepo {
    async fn create_with_owner(&self, household: &Household, owner: &HouseholdMember) -> Result<Household, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Household>(
            "INSERT INTO households (id, name, description, created_by, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&household.id)
            .bind(&household.name)
            .bind(&household.description)
            .bind(&household.created_by)
            .bind(household.created_at)
            .bind(household.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO household_members (id, household_id, user_id, role, joined_at) VALUES (?, ?, ?, ?, ?)"
        )
            .bind(&owner.id)
            .bind(&owner.household_id)
            .bind(&owner.user_id)
            .bind(&owner.role)
            .bind(owner.joined_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Household>, AppError> {
        sqlx::query_as::<_, Household>("SELECT * FROM households WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Household>, AppError> {
        sqlx::query_as::<_, Household>(
            "SELECT h.* FROM households h
             JOIN household_members m ON m.household_id = h.id
             WHERE m.user_id = ?
             ORDER BY m.joined_at"
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, household: &Household) -> Result<Household, AppError> {
        sqlx::query_as::<_, Household>(
            "UPDATE households SET name = ?, description = ?, updated_at = ? WHERE id = ? RETURNING *"
        )
            .bind(&household.name)
            .bind(&household.description)
            .bind(household.updated_at)
            .bind(&household.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM households WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
