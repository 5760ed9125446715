//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::{Account, AccountRepository, AuthError, RegisterError};
use crate::domain::session::{AuthRequired, ExpiryPolicy, Session, SessionStore, SessionToken};
use crate::domain::DomainError;
use crate::infrastructure::account::{
    AccountService, Availability, PasswordHasher, RegisterRequest,
};
use crate::infrastructure::session::SessionManager;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountServiceHandle>,
    pub sessions: Arc<dyn SessionManagerHandle>,
}

/// Trait for account service operations
#[async_trait::async_trait]
pub trait AccountServiceHandle: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<Account, RegisterError>;
    async fn authenticate(&self, identifier: &str, password: &str)
        -> Result<Account, AuthError>;
    async fn check_username_available(&self, username: &str)
        -> Result<Availability, DomainError>;
    async fn check_email_available(&self, email: &str) -> Result<Availability, DomainError>;
}

/// Trait for session manager operations
#[async_trait::async_trait]
pub trait SessionManagerHandle: Send + Sync {
    async fn create(
        &self,
        account: &Account,
        remember: bool,
    ) -> Result<(SessionToken, Session), DomainError>;
    async fn destroy(&self, token: &SessionToken) -> Result<(), DomainError>;
    async fn require_authenticated(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<Session, AuthRequired>;
    fn policy(&self) -> ExpiryPolicy;
}

#[async_trait::async_trait]
impl<R, H> AccountServiceHandle for AccountService<R, H>
where
    R: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<Account, RegisterError> {
        AccountService::register(self, request).await
    }

    async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        AccountService::authenticate(self, identifier, password).await
    }

    async fn check_username_available(
        &self,
        username: &str,
    ) -> Result<Availability, DomainError> {
        AccountService::check_username_available(self, username).await
    }

    async fn check_email_available(&self, email: &str) -> Result<Availability, DomainError> {
        AccountService::check_email_available(self, email).await
    }
}

#[async_trait::async_trait]
impl<S> SessionManagerHandle for SessionManager<S>
where
    S: SessionStore + 'static,
{
    async fn create(
        &self,
        account: &Account,
        remember: bool,
    ) -> Result<(SessionToken, Session), DomainError> {
        SessionManager::create(self, account, remember).await
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), DomainError> {
        SessionManager::destroy(self, token).await
    }

    async fn require_authenticated(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<Session, AuthRequired> {
        SessionManager::require_authenticated(self, token).await
    }

    fn policy(&self) -> ExpiryPolicy {
        SessionManager::policy(self)
    }
}
