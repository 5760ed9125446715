//! Account service for registration, availability checks, and login

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::account::{
    validate_email, validate_password_strength, validate_username, Account, AccountRepository,
    AuthError, RegisterError, ValidationError,
};
use crate::domain::{ConflictKind, DomainError};

use super::password::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Result of an availability pre-check.
///
/// Purely informational: an "available" answer can race with a concurrent
/// registration, and only the registration insert itself reserves the name.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Availability {
    pub available: bool,
    pub message: String,
}

impl Availability {
    fn yes(message: impl Into<String>) -> Self {
        Self {
            available: true,
            message: message.into(),
        }
    }

    fn no(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: message.into(),
        }
    }
}

/// Account service orchestrating validation, hashing, and persistence
#[derive(Debug)]
pub struct AccountService<R: AccountRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    /// Hash verified on the lookup-miss path of `authenticate`, so an
    /// unknown identifier costs the same as a wrong password. Derived from
    /// the configured hasher: PHC strings embed their cost parameters, so a
    /// hash from different settings would verify at a different speed.
    miss_hash: String,
}

impl<R, H> AccountService<R, H>
where
    R: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    /// Create a new account service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        let miss_hash = hasher.hash("timing-equalizer").unwrap_or_default();

        Self {
            repository,
            hasher,
            miss_hash,
        }
    }

    /// Register a new account.
    ///
    /// Collects every validation failure (format rules, confirmation
    /// mismatch, duplicates) and returns them together; nothing is
    /// persisted unless the whole list is empty. A uniqueness conflict at
    /// insert time is folded back into the same duplicate error the
    /// pre-check would have produced.
    pub async fn register(&self, request: RegisterRequest) -> Result<Account, RegisterError> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_lowercase();

        let mut errors = Vec::new();

        if let Err(e) = validate_username(&username) {
            errors.push(e);
        }

        if let Err(e) = validate_email(&email) {
            errors.push(e);
        }

        errors.extend(validate_password_strength(&request.password));

        if request.password != request.confirm_password {
            errors.push(ValidationError::PasswordMismatch);
        }

        // Fast-path duplicate checks. The store constraint remains the
        // source of truth under concurrency.
        if self.username_taken(&username).await? {
            errors.push(ValidationError::UsernameTaken);
        }

        if self.email_taken(&email).await? {
            errors.push(ValidationError::EmailRegistered);
        }

        if !errors.is_empty() {
            debug!(username = %username, count = errors.len(), "registration rejected");
            return Err(RegisterError::Validation(errors));
        }

        let password_hash = self
            .hash_password(request.password.clone())
            .await
            .map_err(RegisterError::Storage)?;

        let account = Account::new(username, email, password_hash);

        match self.repository.create(account).await {
            Ok(account) => {
                info!(username = %account.username(), id = %account.id(), "account registered");
                Ok(account)
            }
            Err(DomainError::Conflict(ConflictKind::Username)) => {
                // Lost the insert race; report it exactly like the pre-check.
                Err(RegisterError::Validation(vec![
                    ValidationError::UsernameTaken,
                ]))
            }
            Err(DomainError::Conflict(ConflictKind::Email)) => Err(RegisterError::Validation(
                vec![ValidationError::EmailRegistered],
            )),
            Err(e) => {
                warn!(error = %e, "account insert failed");
                Err(RegisterError::Storage(e))
            }
        }
    }

    /// Check whether a username could be registered right now
    pub async fn check_username_available(
        &self,
        username: &str,
    ) -> Result<Availability, DomainError> {
        let username = username.trim();

        if let Err(e) = validate_username(username) {
            return Ok(Availability::no(e.to_string()));
        }

        if self.repository.username_exists(username).await? {
            Ok(Availability::no("Username already taken"))
        } else {
            Ok(Availability::yes("Username is available"))
        }
    }

    /// Check whether an email could be registered right now
    pub async fn check_email_available(&self, email: &str) -> Result<Availability, DomainError> {
        let email = email.trim().to_lowercase();

        if let Err(e) = validate_email(&email) {
            return Ok(Availability::no(e.to_string()));
        }

        if self.repository.email_exists(&email).await? {
            Ok(Availability::no("Email already registered"))
        } else {
            Ok(Availability::yes("Email is available"))
        }
    }

    /// Authenticate with a username or email plus password.
    ///
    /// Unknown identifiers and wrong passwords produce the same error; a
    /// disabled account with correct credentials is reported distinctly.
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        let account = self
            .find_by_identifier(identifier)
            .await
            .map_err(AuthError::Storage)?;

        let Some(account) = account else {
            // Burn a comparable amount of work so a miss is not observably
            // faster than a wrong password.
            let _ = self
                .verify_password(password.to_string(), self.miss_hash.clone())
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        let verified = self
            .verify_password(password.to_string(), account.password_hash().to_string())
            .await
            .map_err(AuthError::Storage)?;

        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        if !account.is_active() {
            info!(username = %account.username(), "login rejected for disabled account");
            return Err(AuthError::AccountDisabled);
        }

        self.repository
            .record_login(account.id())
            .await
            .map_err(AuthError::Storage)?;

        let refreshed = self
            .repository
            .get(account.id())
            .await
            .map_err(AuthError::Storage)?;

        info!(username = %account.username(), "login succeeded");
        Ok(refreshed.unwrap_or(account))
    }

    /// Look up by exact username first, then by lowercase-normalized email
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError> {
        let identifier = identifier.trim();

        if let Some(account) = self.repository.get_by_username(identifier).await? {
            return Ok(Some(account));
        }

        self.repository
            .get_by_email(&identifier.to_lowercase())
            .await
    }

    async fn username_taken(&self, username: &str) -> Result<bool, RegisterError> {
        self.repository
            .username_exists(username)
            .await
            .map_err(RegisterError::Storage)
    }

    async fn email_taken(&self, email: &str) -> Result<bool, RegisterError> {
        self.repository
            .email_exists(email)
            .await
            .map_err(RegisterError::Storage)
    }

    /// Hashing is CPU-bound; keep it off the async reactor
    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Verification task failed: {}", e)))
    }
}
