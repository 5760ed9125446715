//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account identifier, assigned at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account is active and can log in
    #[default]
    Active,
    /// Account has been deactivated by an administrator
    Disabled,
}

impl AccountStatus {
    /// Check if the account can log in
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A registered user account.
///
/// The username and email are globally unique; the backing store enforces
/// this with unique constraints. The password hash is never empty once the
/// account exists and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    id: AccountId,
    /// Username for login, unique, compared case-sensitively
    username: String,
    /// Email address, unique, stored lowercase
    email: String,
    /// Argon2 password hash in PHC string format - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Current status of the account
    status: AccountStatus,
    /// Creation timestamp, set once
    created_at: DateTime<Utc>,
    /// Last successful login timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new account from a successful registration
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: AccountId::generate(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            status: AccountStatus::Active,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    /// Rehydrate an account from stored fields. Used by repositories only.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: AccountId,
        username: String,
        email: String,
        password_hash: String,
        status: AccountStatus,
        created_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            status,
            created_at,
            last_login_at,
        }
    }

    // Getters

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Check if the account is active and can log in
    pub fn is_active(&self) -> bool {
        self.status.can_login()
    }

    // Mutators

    /// Record a successful login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    /// Deactivate the account, disabling login without deleting the record
    pub fn disable(&mut self) {
        self.status = AccountStatus::Disabled;
    }

    /// Reactivate a disabled account
    pub fn enable(&mut self) {
        self.status = AccountStatus::Active;
    }
}
