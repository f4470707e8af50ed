use crate::domain::{
    models::{invitation::HouseholdInvitation, member::HouseholdMember},
    ports::InvitationRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresInvitationRepo {
    pool: PgPool,
}

impl PostgresInvitationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepo {
    async fn create(&self, invitation: &HouseholdInvitation) -> Result<HouseholdInvitation, AppError> {
        sqlx::query_as::<_, HouseholdInvitation>(
            "INSERT INTO household_invitations (id, household_id, invited_by, role, code, expires_at, accepted_at, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *"
        )
            .bind(&invitation.id)
            .bind(&invitation.household_id)
            .bind(&invitation.invited_by)
            .bind(&invitation.role)
            .bind(&invitation.code)
            .bind(invitation.expires_at)
            .bind(invitation.accepted_at)
            .bind(invitation.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_inviter(&self, household_id: &str, inviter_id: &str, now: DateTime<Utc>) -> Result<Option<HouseholdInvitation>, AppError> {
        sqlx::query_as::<_, HouseholdInvitation>(
            "SELECT * FROM household_invitations
             WHERE household_id = $1 AND invited_by = $2 AND accepted_at IS NULL AND expires_at > $3"
        )
            .bind(household_id)
            .bind(inviter_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_redeemable(&self, code: &str, now: DateTime<Utc>) -> Result<Option<HouseholdInvitation>, AppError> {
        sqlx::query_as::<_, HouseholdInvitation>(
            "SELECT * FROM household_invitations
             WHERE code = $1 AND accepted_at IS NULL AND expires_at > $2"
        )
            .bind(code)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn accept(&self, invitation_id: &str, member: &HouseholdMember, accepted_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO household_members (id, household_id, user_id, role, joined_at) VALUES ($1, $2, $3, $4, $5)"
        )
            .bind(&member.id)
            .bind(&member.household_id)
            .bind(&member.user_id)
            .bind(&member.role)
            .bind(member.joined_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        // The code is single-use: claiming it must flip exactly one
        // unaccepted row, or a racing redemption got there first.
        let claimed = sqlx::query(
            "UPDATE household_invitations SET accepted_at = $1 WHERE id = $2 AND accepted_at IS NULL"
        )
            .bind(accepted_at)
            .bind(invitation_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if claimed.rows_affected() != 1 {
            tx.rollback().await.map_err(AppError::Database)?;
            return Err(AppError::NotFound("Invalid or expired invitation code".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
