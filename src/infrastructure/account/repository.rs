//! In-memory account repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::{ConflictKind, DomainError};

/// In-memory implementation of `AccountRepository`.
///
/// Username and email indexes are kept under the same lock as the account
/// map, so a create observes and updates all three atomically; this is the
/// in-memory stand-in for the database's unique constraints.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<AccountId, Account>,
    /// username -> account ID
    username_index: HashMap<String, AccountId>,
    /// lowercase email -> account ID
    email_index: HashMap<String, AccountId>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .username_index
            .get(username)
            .and_then(|id| inner.accounts.get(id))
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .email_index
            .get(email)
            .and_then(|id| inner.accounts.get(id))
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.accounts.contains_key(&account.id()) {
            return Err(DomainError::conflict(ConflictKind::AccountId));
        }

        if inner.username_index.contains_key(account.username()) {
            return Err(DomainError::conflict(ConflictKind::Username));
        }

        if inner.email_index.contains_key(account.email()) {
            return Err(DomainError::conflict(ConflictKind::Email));
        }

        inner
            .username_index
            .insert(account.username().to_string(), account.id());
        inner
            .email_index
            .insert(account.email().to_string(), account.id());
        inner.accounts.insert(account.id(), account.clone());

        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let mut inner = self.inner.write().await;

        if !inner.accounts.contains_key(&account.id()) {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                account.id()
            )));
        }

        // Username and email are immutable after registration, so the
        // indexes need no maintenance here.
        inner.accounts.insert(account.id(), account.clone());

        Ok(account.clone())
    }

    async fn record_login(&self, id: AccountId) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        match inner.accounts.get_mut(&id) {
            Some(account) => {
                account.record_login();
                Ok(())
            }
            None => Err(DomainError::not_found(format!(
                "Account '{}' not found",
                id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account(username: &str, email: &str) -> Account {
        Account::new(username, email, "hashed_password")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryAccountRepository::new();
        let account = test_account("alice", "alice@x.com");

        repo.create(account.clone()).await.unwrap();

        let retrieved = repo.get(account.id()).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().username(), "alice");
    }

    #[tokio::test]
    async fn test_get_by_username_is_case_sensitive() {
        let repo = InMemoryAccountRepository::new();
        repo.create(test_account("Alice", "alice@x.com"))
            .await
            .unwrap();

        assert!(repo.get_by_username("Alice").await.unwrap().is_some());
        assert!(repo.get_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = InMemoryAccountRepository::new();
        repo.create(test_account("alice", "alice@x.com"))
            .await
            .unwrap();

        let found = repo.get_by_email("alice@x.com").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().username(), "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_conflict() {
        let repo = InMemoryAccountRepository::new();
        repo.create(test_account("alice", "alice@x.com"))
            .await
            .unwrap();

        let result = repo.create(test_account("alice", "other@x.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Conflict(ConflictKind::Username))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflict() {
        let repo = InMemoryAccountRepository::new();
        repo.create(test_account("alice", "alice@x.com"))
            .await
            .unwrap();

        let result = repo.create(test_account("bob", "alice@x.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Conflict(ConflictKind::Email))
        ));
    }

    #[tokio::test]
    async fn test_failed_create_leaves_no_trace() {
        let repo = InMemoryAccountRepository::new();
        repo.create(test_account("alice", "alice@x.com"))
            .await
            .unwrap();

        // Same username, different email: the insert must not claim the
        // new email as a side effect.
        let result = repo.create(test_account("alice", "fresh@x.com")).await;
        assert!(result.is_err());

        assert!(repo.get_by_email("fresh@x.com").await.unwrap().is_none());
        let ok = repo.create(test_account("carol", "fresh@x.com")).await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryAccountRepository::new();
        let mut account = test_account("alice", "alice@x.com");
        repo.create(account.clone()).await.unwrap();

        account.disable();
        repo.update(&account).await.unwrap();

        let retrieved = repo.get(account.id()).await.unwrap().unwrap();
        assert!(!retrieved.is_active());
    }

    #[tokio::test]
    async fn test_update_unknown_account() {
        let repo = InMemoryAccountRepository::new();
        let account = test_account("ghost", "ghost@x.com");

        let result = repo.update(&account).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_record_login() {
        let repo = InMemoryAccountRepository::new();
        let account = test_account("alice", "alice@x.com");
        repo.create(account.clone()).await.unwrap();

        repo.record_login(account.id()).await.unwrap();

        let after = repo.get(account.id()).await.unwrap().unwrap();
        assert!(after.last_login_at().is_some());
    }

    #[tokio::test]
    async fn test_exists_helpers() {
        let repo = InMemoryAccountRepository::new();
        repo.create(test_account("alice", "alice@x.com"))
            .await
            .unwrap();

        assert!(repo.username_exists("alice").await.unwrap());
        assert!(!repo.username_exists("bob").await.unwrap());
        assert!(repo.email_exists("alice@x.com").await.unwrap());
        assert!(!repo.email_exists("bob@x.com").await.unwrap());
    }
}
