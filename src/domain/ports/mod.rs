use crate::domain::models::{
    auth::RefreshTokenRecord, household::Household, invitation::HouseholdInvitation,
    member::HouseholdMember, product::Product,
    stock::{RestockTarget, StockChangeOutcome, StockChangeType, StockHistoryEntry},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait HouseholdRepository: Send + Sync {
    /// Inserts the household and its owner membership row in one transaction.
    async fn create_with_owner(&self, household: &Household, owner: &HouseholdMember) -> Result<Household, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Household>, AppError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Household>, AppError>;
    async fn update(&self, household: &Household) -> Result<Household, AppError>;
    /// Cascades to members, products, invitations and stock history via FK rules.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find(&self, household_id: &str, user_id: &str) -> Result<Option<HouseholdMember>, AppError>;
    async fn list_by_household(&self, household_id: &str) -> Result<Vec<HouseholdMember>, AppError>;
    async fn delete(&self, household_id: &str, user_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn create(&self, invitation: &HouseholdInvitation) -> Result<HouseholdInvitation, AppError>;
    /// Unaccepted, unexpired invitation by this inviter for this household.
    async fn find_active_by_inviter(&self, household_id: &str, inviter_id: &str, now: DateTime<Utc>) -> Result<Option<HouseholdInvitation>, AppError>;
    /// Unaccepted, unexpired invitation carrying this code.
    async fn find_redeemable(&self, code: &str, now: DateTime<Utc>) -> Result<Option<HouseholdInvitation>, AppError>;
    /// Inserts the membership row and stamps `accepted_at` atomically.
    async fn accept(&self, invitation_id: &str, member: &HouseholdMember, accepted_at: DateTime<Utc>) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<Product, AppError>;
    async fn find_by_id(&self, household_id: &str, id: &str) -> Result<Option<Product>, AppError>;
    async fn list_by_household(&self, household_id: &str) -> Result<Vec<Product>, AppError>;
    async fn update(&self, product: &Product) -> Result<Product, AppError>;
    async fn delete(&self, household_id: &str, id: &str) -> Result<(), AppError>;
    /// Transactional read-modify-write so concurrent changes cannot drop a
    /// delta. Returns the stock values observed inside the transaction.
    async fn apply_stock_change(
        &self,
        household_id: &str,
        product_id: &str,
        amount: i64,
        change_type: StockChangeType,
    ) -> Result<StockChangeOutcome, AppError>;

    /// Raises stock exactly to the target level. Shortfall is computed
    /// from the row read inside the same transaction that updates it, so
    /// a concurrent change cannot overshoot the target. Never lowers
    /// stock; at or above target is a no-op.
    async fn restock_to_target(
        &self,
        household_id: &str,
        product_id: &str,
        target: RestockTarget,
    ) -> Result<StockChangeOutcome, AppError>;
}

#[async_trait]
pub trait StockHistoryRepository: Send + Sync {
    async fn append(&self, entry: &StockHistoryEntry) -> Result<(), AppError>;
}
