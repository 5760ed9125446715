//! Session lifecycle management

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::account::Account;
use crate::domain::session::{AuthRequired, ExpiryPolicy, Session, SessionStore, SessionToken};
use crate::domain::DomainError;

const TOKEN_BYTES: usize = 32;

/// Creates, reads, and destroys authenticated sessions.
///
/// The caller supplies the token with each call; the manager never holds
/// ambient per-request state. Expired sessions are evicted lazily on read.
#[derive(Debug)]
pub struct SessionManager<S: SessionStore> {
    store: Arc<S>,
    policy: ExpiryPolicy,
}

impl<S: SessionStore> SessionManager<S> {
    /// Create a manager over a store with the given expiry policy
    pub fn new(store: Arc<S>, policy: ExpiryPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Start a session for an authenticated account
    pub async fn create(
        &self,
        account: &Account,
        remember: bool,
    ) -> Result<(SessionToken, Session), DomainError> {
        let token = generate_token();
        let session = Session::for_account(account, remember);

        self.store.insert(token.clone(), session.clone()).await?;

        debug!(username = %session.username(), remember, "session created");
        Ok((token, session))
    }

    /// Clear the session for a token. Idempotent: destroying an absent
    /// session is not an error.
    pub async fn destroy(&self, token: &SessionToken) -> Result<(), DomainError> {
        self.store.remove(token).await
    }

    /// Read the current session, touching its idle clock.
    ///
    /// Returns `None` for unknown tokens and for sessions past their
    /// lifetime; expired entries are removed on the way out.
    pub async fn current(&self, token: &SessionToken) -> Result<Option<Session>, DomainError> {
        let Some(mut session) = self.store.get(token).await? else {
            return Ok(None);
        };

        if self.policy.is_expired(&session, chrono::Utc::now()) {
            debug!(username = %session.username(), "session expired");
            self.store.remove(token).await?;
            return Ok(None);
        }

        session.touch();
        self.store.insert(token.clone(), session.clone()).await?;

        Ok(Some(session))
    }

    /// Explicit guard for protected operations.
    ///
    /// The boundary layer pattern-matches on the result and turns
    /// `AuthRequired` into a redirect-to-login response.
    pub async fn require_authenticated(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<Session, AuthRequired> {
        let Some(token) = token else {
            return Err(AuthRequired);
        };

        match self.current(token).await {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err(AuthRequired),
            Err(e) => {
                warn!(error = %e, "session lookup failed");
                Err(AuthRequired)
            }
        }
    }
}

/// 256 bits of randomness, URL-safe encoded
fn generate_token() -> SessionToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);

    SessionToken::from(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::session::InMemorySessionStore;
    use chrono::{Duration, Utc};

    fn test_account() -> Account {
        Account::new("alice", "alice@x.com", "hash")
    }

    fn manager() -> (Arc<InMemorySessionStore>, SessionManager<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let manager = SessionManager::new(Arc::clone(&store), ExpiryPolicy::default());
        (store, manager)
    }

    #[tokio::test]
    async fn test_create_and_current() {
        let (_, manager) = manager();
        let account = test_account();

        let (token, session) = manager.create(&account, false).await.unwrap();
        assert_eq!(session.account_id(), account.id());

        let current = manager.current(&token).await.unwrap();
        assert!(current.is_some());
        assert_eq!(current.unwrap().username(), "alice");
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let (_, manager) = manager();
        let account = test_account();

        let (t1, _) = manager.create(&account, false).await.unwrap();
        let (t2, _) = manager.create(&account, false).await.unwrap();

        assert_ne!(t1, t2);
    }

    #[tokio::test]
    async fn test_destroy_then_current_is_none() {
        let (_, manager) = manager();
        let (token, _) = manager.create(&test_account(), false).await.unwrap();

        manager.destroy(&token).await.unwrap();
        assert!(manager.current(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let (_, manager) = manager();
        let (token, _) = manager.create(&test_account(), false).await.unwrap();

        manager.destroy(&token).await.unwrap();
        manager.destroy(&token).await.unwrap();

        // Destroying a token that never existed is also fine
        manager
            .destroy(&SessionToken::from("never-issued"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_idle_session_is_evicted() {
        let (store, manager) = manager();
        let (token, mut session) = manager.create(&test_account(), false).await.unwrap();

        // Age the session past the 30-minute idle timeout
        session.set_last_seen_at(Utc::now() - Duration::minutes(31));
        store.insert(token.clone(), session).await.unwrap();

        assert!(manager.current(&token).await.unwrap().is_none());
        // Evicted from the store, not just filtered
        assert!(store.get(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remembered_session_survives_idle_timeout() {
        let (store, manager) = manager();
        let (token, mut session) = manager.create(&test_account(), true).await.unwrap();

        session.set_last_seen_at(Utc::now() - Duration::hours(2));
        store.insert(token.clone(), session).await.unwrap();

        assert!(manager.current(&token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_current_touches_idle_clock() {
        let (store, manager) = manager();
        let (token, mut session) = manager.create(&test_account(), false).await.unwrap();

        session.set_last_seen_at(Utc::now() - Duration::minutes(20));
        store.insert(token.clone(), session).await.unwrap();

        manager.current(&token).await.unwrap().unwrap();

        let touched = store.get(&token).await.unwrap().unwrap();
        assert!(touched.last_seen_at() > Utc::now() - Duration::minutes(1));
    }

    #[tokio::test]
    async fn test_require_authenticated() {
        let (_, manager) = manager();
        let (token, _) = manager.create(&test_account(), false).await.unwrap();

        let session = manager.require_authenticated(Some(&token)).await.unwrap();
        assert_eq!(session.username(), "alice");

        assert_eq!(
            manager.require_authenticated(None).await.unwrap_err(),
            AuthRequired
        );

        manager.destroy(&token).await.unwrap();
        assert_eq!(
            manager
                .require_authenticated(Some(&token))
                .await
                .unwrap_err(),
            AuthRequired
        );
    }
}
