//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, AccountId};
use crate::domain::DomainError;

/// Repository trait for account storage.
///
/// Implementations must enforce username and email uniqueness with
/// store-level constraints: the service's pre-checks are a fast path only,
/// and two concurrent registrations can both pass them. `create` reports a
/// lost race as `DomainError::Conflict` with the colliding field.
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Get an account by its ID
    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    /// Get an account by exact username (case-sensitive, as stored)
    async fn get_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Get an account by email. Callers pass the lowercase-normalized form.
    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Atomically create a new account, or leave no trace on conflict
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account
    async fn update(&self, account: &Account) -> Result<Account, DomainError>;

    /// Record a successful login for an account
    async fn record_login(&self, id: AccountId) -> Result<(), DomainError>;

    /// Check if a username is taken
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }

    /// Check if an email is registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
