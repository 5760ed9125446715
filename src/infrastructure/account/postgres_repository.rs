//! PostgreSQL account repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::account::{Account, AccountId, AccountRepository, AccountStatus};
use crate::domain::{ConflictKind, DomainError};

/// Schema for the accounts table.
///
/// The unique indexes on username and email are the actual uniqueness
/// guarantee under concurrent registration; service-level pre-checks only
/// improve the error message on the common path.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id            UUID PRIMARY KEY,
    username      TEXT NOT NULL,
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    status        TEXT NOT NULL DEFAULT 'active',
    created_at    TIMESTAMPTZ NOT NULL,
    last_login_at TIMESTAMPTZ,
    CONSTRAINT accounts_username_key UNIQUE (username),
    CONSTRAINT accounts_email_key UNIQUE (email)
)
"#;

/// PostgreSQL implementation of `AccountRepository`
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the schema. Run once at startup, decoupled from request handling.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DomainError> {
        sqlx::query(SCHEMA)
            .execute(pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to apply schema: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, status, created_at, last_login_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account: {}", e)))?;

        row.map(|row| row_to_account(&row)).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, status, created_at, last_login_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account by username: {}", e)))?;

        row.map(|row| row_to_account(&row)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, status, created_at, last_login_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account by email: {}", e)))?;

        row.map(|row| row_to_account(&row)).transpose()
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, status,
                                  created_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.username())
        .bind(account.email())
        .bind(account.password_hash())
        .bind(status_to_str(account.status()))
        .bind(account.created_at())
        .bind(account.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(translate_insert_error)?;

        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, status = $3, last_login_at = $4
            WHERE id = $1
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.password_hash())
        .bind(status_to_str(account.status()))
        .bind(account.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update account: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                account.id()
            )));
        }

        Ok(account.clone())
    }

    async fn record_login(&self, id: AccountId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE accounts SET last_login_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to record login: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to check username: {}", e)))?;

        Ok(exists)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to check email: {}", e)))?;

        Ok(exists)
    }
}

/// Map a failed insert to a structured conflict when a unique constraint
/// lost the race, so the service can surface the matching duplicate error.
fn translate_insert_error(e: sqlx::Error) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("accounts_username_key") => DomainError::conflict(ConflictKind::Username),
                Some("accounts_email_key") => DomainError::conflict(ConflictKind::Email),
                _ => DomainError::conflict(ConflictKind::AccountId),
            };
        }
    }

    DomainError::storage(format!("Failed to create account: {}", e))
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> Result<Account, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let username: String = row.get("username");
    let email: String = row.get("email");
    let password_hash: String = row.get("password_hash");
    let status: String = row.get("status");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let last_login_at: Option<chrono::DateTime<chrono::Utc>> = row.get("last_login_at");

    Ok(Account::from_parts(
        AccountId::from(id),
        username,
        email,
        password_hash,
        str_to_status(&status)?,
        created_at,
        last_login_at,
    ))
}

fn status_to_str(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Active => "active",
        AccountStatus::Disabled => "disabled",
    }
}

fn str_to_status(s: &str) -> Result<AccountStatus, DomainError> {
    match s {
        "active" => Ok(AccountStatus::Active),
        "disabled" => Ok(AccountStatus::Disabled),
        other => Err(DomainError::storage(format!(
            "Unknown account status in database: '{}'",
            other
        ))),
    }
}
