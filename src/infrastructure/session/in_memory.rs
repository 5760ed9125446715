//! In-memory session store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::session::{Session, SessionStore, SessionToken};
use crate::domain::DomainError;

/// In-memory implementation of `SessionStore`
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl InMemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token).cloned())
    }

    async fn insert(&self, token: SessionToken, session: Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(token, session);
        Ok(())
    }

    async fn remove(&self, token: &SessionToken) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Account;

    fn test_session() -> Session {
        let account = Account::new("alice", "alice@x.com", "hash");
        Session::for_account(&account, false)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::from("token-1");

        store.insert(token.clone(), test_session()).await.unwrap();

        let session = store.get(&token).await.unwrap();
        assert!(session.is_some());
        assert_eq!(session.unwrap().username(), "alice");
    }

    #[tokio::test]
    async fn test_get_unknown_token() {
        let store = InMemorySessionStore::new();

        let session = store.get(&SessionToken::from("missing")).await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::from("token-1");

        store.insert(token.clone(), test_session()).await.unwrap();

        store.remove(&token).await.unwrap();
        assert!(store.get(&token).await.unwrap().is_none());

        // Removing again is not an error
        store.remove(&token).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_replaces_existing() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::from("token-1");

        store.insert(token.clone(), test_session()).await.unwrap();

        let account = Account::new("bob", "bob@x.com", "hash");
        let replacement = Session::for_account(&account, true);
        store.insert(token.clone(), replacement).await.unwrap();

        let session = store.get(&token).await.unwrap().unwrap();
        assert_eq!(session.username(), "bob");
    }
}
