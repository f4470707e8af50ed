use crate::domain::{models::member::HouseholdMember, ports::MemberRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteMemberRepo {
    pool: SqlitePool,
}

impl SqliteMemberRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepo {
    async fn find(&self, household_id: &str, user_id: &str) -> Result<Option<HouseholdMember>, AppError> {
        sqlx::query_as::<_, HouseholdMember>(
            "SELECT * FROM household_members WHERE household_id = ? AND user_id = ?"
        )
            .bind(household_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_household(&self, household_id: &str) -> Result<Vec<HouseholdMember>, AppError> {
        sqlx::query_as::<_, HouseholdMember>(
            "SELECT * FROM household_members WHERE household_id = ? ORDER BY joined_at"
        )
            .bind(household_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, household_id: &str, user_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM household_members WHERE household_id = ? AND user_id = ?")
            .bind(household_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
