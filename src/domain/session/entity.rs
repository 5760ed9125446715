//! Session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::account::{Account, AccountId};

/// One authenticated client context.
///
/// Holds a denormalized snapshot of the account taken at login time; the
/// account record itself remains the source of truth. Sessions are explicit
/// values threaded through each request, never ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    account_id: AccountId,
    username: String,
    email: String,
    /// Whether the session outlives the default idle timeout
    remember: bool,
    created_at: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
}

impl Session {
    /// Snapshot an account into a new session
    pub fn for_account(account: &Account, remember: bool) -> Self {
        let now = Utc::now();

        Self {
            account_id: account.id(),
            username: account.username().to_string(),
            email: account.email().to_string(),
            remember,
            created_at: now,
            last_seen_at: now,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn remember(&self) -> bool {
        self.remember
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_seen_at(&self) -> DateTime<Utc> {
        self.last_seen_at
    }

    /// Mark activity, resetting the idle clock
    pub fn touch(&mut self) {
        self.last_seen_at = Utc::now();
    }

    #[cfg(test)]
    pub fn set_last_seen_at(&mut self, at: DateTime<Utc>) {
        self.last_seen_at = at;
    }

    #[cfg(test)]
    pub fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }
}
