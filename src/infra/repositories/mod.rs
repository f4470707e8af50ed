pub mod sqlite_user_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_household_repo;
pub mod sqlite_member_repo;
pub mod sqlite_invitation_repo;
pub mod sqlite_product_repo;
pub mod sqlite_stock_history_repo;

pub mod postgres_user_repo;
pub mod postgres_auth_repo;
pub mod postgres_household_repo;
pub mod postgres_member_repo;
pub mod postgres_invitation_repo;
pub mod postgres_product_repo;
pub mod postgres_stock_history_repo;
