//! Session store abstraction and expiry policy

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::fmt::Debug;
use thiserror::Error;

use super::entity::Session;
use crate::domain::DomainError;

/// Opaque session token supplied by the caller with each request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SessionToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Signals that an operation requires an authenticated session.
///
/// The boundary layer turns this into a redirect-to-login response.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Please login to access this page")]
pub struct AuthRequired;

/// How long sessions live.
///
/// Short-lived sessions expire after `idle_timeout` of inactivity;
/// remembered sessions last `remember_lifetime` from creation.
#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    pub idle_timeout: Duration,
    pub remember_lifetime: Duration,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::minutes(30),
            remember_lifetime: Duration::days(30),
        }
    }
}

impl ExpiryPolicy {
    /// Whether the session is past its lifetime at `now`
    pub fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now >= self.expires_at(session)
    }

    /// The instant the session stops being valid, given no further activity
    pub fn expires_at(&self, session: &Session) -> DateTime<Utc> {
        if session.remember() {
            session.created_at() + self.remember_lifetime
        } else {
            session.last_seen_at() + self.idle_timeout
        }
    }
}

/// Storage for sessions, addressed by a caller-supplied token
#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    /// Load the session for a token, if any
    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, DomainError>;

    /// Store or replace the session for a token
    async fn insert(&self, token: SessionToken, session: Session) -> Result<(), DomainError>;

    /// Remove the session for a token. Removing an absent token is not an error.
    async fn remove(&self, token: &SessionToken) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Account;

    fn session(remember: bool) -> Session {
        let account = Account::new("alice", "alice@x.com", "hash");
        Session::for_account(&account, remember)
    }

    #[test]
    fn test_idle_session_expires_after_timeout() {
        let policy = ExpiryPolicy::default();
        let mut s = session(false);

        assert!(!policy.is_expired(&s, Utc::now()));

        s.set_last_seen_at(Utc::now() - Duration::minutes(31));
        assert!(policy.is_expired(&s, Utc::now()));
    }

    #[test]
    fn test_activity_resets_the_idle_clock() {
        let policy = ExpiryPolicy::default();
        let mut s = session(false);

        s.set_last_seen_at(Utc::now() - Duration::minutes(29));
        assert!(!policy.is_expired(&s, Utc::now()));

        s.touch();
        assert!(!policy.is_expired(&s, Utc::now() + Duration::minutes(29)));
    }

    #[test]
    fn test_remembered_session_outlives_idle_timeout() {
        let policy = ExpiryPolicy::default();
        let mut s = session(true);

        s.set_last_seen_at(Utc::now() - Duration::hours(5));
        assert!(!policy.is_expired(&s, Utc::now()));
    }

    #[test]
    fn test_remembered_session_expires_at_lifetime() {
        let policy = ExpiryPolicy::default();
        let mut s = session(true);

        s.set_created_at(Utc::now() - Duration::days(31));
        assert!(policy.is_expired(&s, Utc::now()));
    }
}
