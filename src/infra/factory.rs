use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::invitation_service::InvitationService;
use crate::infra::repositories::{
    postgres_auth_repo::PostgresAuthRepo, postgres_household_repo::PostgresHouseholdRepo,
    postgres_invitation_repo::PostgresInvitationRepo, postgres_member_repo::PostgresMemberRepo,
    postgres_product_repo::PostgresProductRepo, postgres_stock_history_repo::PostgresStockHistoryRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_household_repo::SqliteHouseholdRepo,
    sqlite_invitation_repo::SqliteInvitationRepo, sqlite_member_repo::SqliteMemberRepo,
    sqlite_product_repo::SqliteProductRepo, sqlite_stock_history_repo::SqliteStockHistoryRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let household_repo = Arc::new(PostgresHouseholdRepo::new(pool.clone()));
        let member_repo = Arc::new(PostgresMemberRepo::new(pool.clone()));
        let invitation_repo = Arc::new(PostgresInvitationRepo::new(pool.clone()));
        let invitation_service = Arc::new(InvitationService::new(
            invitation_repo,
            member_repo.clone(),
            household_repo.clone(),
            config.invitation_ttl_minutes,
        ));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            auth_repo,
            household_repo,
            member_repo,
            product_repo: Arc::new(PostgresProductRepo::new(pool.clone())),
            stock_history_repo: Arc::new(PostgresStockHistoryRepo::new(pool.clone())),
            auth_service,
            invitation_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let household_repo = Arc::new(SqliteHouseholdRepo::new(pool.clone()));
        let member_repo = Arc::new(SqliteMemberRepo::new(pool.clone()));
        let invitation_repo = Arc::new(SqliteInvitationRepo::new(pool.clone()));
        let invitation_service = Arc::new(InvitationService::new(
            invitation_repo,
            member_repo.clone(),
            household_repo.clone(),
            config.invitation_ttl_minutes,
        ));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            household_repo,
            member_repo,
            product_repo: Arc::new(SqliteProductRepo::new(pool.clone())),
            stock_history_repo: Arc::new(SqliteStockHistoryRepo::new(pool.clone())),
            auth_service,
            invitation_service,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
