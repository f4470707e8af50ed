use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, HouseholdRepository, MemberRepository,
    ProductRepository, StockHistoryRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::invitation_service::InvitationService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub household_repo: Arc<dyn HouseholdRepository>,
    pub member_repo: Arc<dyn MemberRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub stock_history_repo: Arc<dyn StockHistoryRepository>,
    pub auth_service: Arc<AuthService>,
    pub invitation_service: Arc<InvitationService>,
}
