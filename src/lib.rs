//! User registration and login service
//!
//! A minimal username/email/password authentication layer:
//! - Registration with full validation error reporting
//! - Credential login by username or email, with session-backed access
//! - Availability pre-checks for interactive forms
//! - Pluggable account storage (PostgreSQL or in-memory)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use api::state::{AccountServiceHandle, AppState, SessionManagerHandle};
use domain::session::ExpiryPolicy;
use infrastructure::account::{
    AccountService, Argon2Hasher, InMemoryAccountRepository, PostgresAccountRepository,
};
use infrastructure::session::{InMemorySessionStore, SessionManager};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?);

    let policy = ExpiryPolicy {
        idle_timeout: Duration::minutes(config.session.idle_timeout_minutes as i64),
        remember_lifetime: Duration::days(config.session.remember_lifetime_days as i64),
    };

    let sessions: Arc<dyn SessionManagerHandle> = Arc::new(SessionManager::new(
        Arc::new(InMemorySessionStore::new()),
        policy,
    ));

    let accounts: Arc<dyn AccountServiceHandle> = match &config.database.url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;

            // Schema applied once at startup, never from request handling
            PostgresAccountRepository::ensure_schema(&pool).await?;

            info!("Using the PostgreSQL account store");
            Arc::new(AccountService::new(
                Arc::new(PostgresAccountRepository::new(pool)),
                hasher,
            ))
        }
        None => {
            warn!("No database URL configured; accounts will not survive a restart");
            Arc::new(AccountService::new(
                Arc::new(InMemoryAccountRepository::new()),
                hasher,
            ))
        }
    };

    Ok(AppState { accounts, sessions })
}
