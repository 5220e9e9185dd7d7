//! In-memory identity provider
//!
//! A fixed account table for tests and demos. Sign-in resolves against the
//! table and publishes the new session on the auth-state stream; sign-out
//! publishes `None`. Distinguishes "unknown user" from "wrong password" the
//! way the original backend did.

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use async_trait::async_trait;
use opina_types::Session;

use crate::error::{AuthError, AuthResult};
use crate::provider::IdentityProvider;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
    display_name: Option<String>,
}

/// In-memory [`IdentityProvider`] backed by a concurrent account table.
pub struct MemoryIdentityProvider {
    accounts: DashMap<String, Account>,
    sessions_tx: watch::Sender<Option<Session>>,
}

impl MemoryIdentityProvider {
    /// Create a provider with an empty account table and no active session.
    pub fn new() -> Self {
        let (sessions_tx, _) = watch::channel(None);
        Self {
            accounts: DashMap::new(),
            sessions_tx,
        }
    }

    /// Register an account. The uid is assigned here and stays stable across
    /// sign-ins.
    pub fn register(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: Option<&str>,
    ) -> String {
        let uid = Uuid::new_v4().to_string();
        self.accounts.insert(
            email.into(),
            Account {
                uid: uid.clone(),
                password: password.into(),
                display_name: display_name.map(str::to_string),
            },
        );
        uid
    }

    /// The currently signed-in session, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.sessions_tx.borrow().clone()
    }
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        let account = self.accounts.get(email).ok_or_else(|| {
            warn!(email, "sign-in failed: unknown user");
            AuthError::UserNotFound
        })?;

        if account.password != password {
            warn!(email, "sign-in failed: wrong password");
            return Err(AuthError::WrongPassword);
        }

        let mut session = Session::new(account.uid.clone(), email);
        if let Some(name) = &account.display_name {
            session = session.with_display_name(name.clone());
        }

        info!(email, uid = %session.uid, "signed in");
        let _ = self.sessions_tx.send(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) {
        if self.sessions_tx.borrow().is_some() {
            info!("signed out");
            let _ = self.sessions_tx.send(None);
        }
    }

    fn sessions(&self) -> watch::Receiver<Option<Session>> {
        self.sessions_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_resolves_the_registered_account() {
        let provider = MemoryIdentityProvider::new();
        let uid = provider.register("a@b.com", "secret1", Some("Ada"));

        let session = provider.sign_in("a@b.com", "secret1").await.unwrap();
        assert_eq!(session.uid, uid);
        assert_eq!(session.email, "a@b.com");
        assert_eq!(session.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_distinct() {
        let provider = MemoryIdentityProvider::new();
        provider.register("a@b.com", "secret1", None);

        assert_eq!(
            provider.sign_in("ghost@b.com", "secret1").await,
            Err(AuthError::UserNotFound)
        );
        assert_eq!(
            provider.sign_in("a@b.com", "wrong-pass").await,
            Err(AuthError::WrongPassword)
        );
        assert_eq!(provider.current_session(), None);
    }

    #[tokio::test]
    async fn session_stream_follows_sign_in_and_out() {
        let provider = MemoryIdentityProvider::new();
        provider.register("a@b.com", "secret1", None);
        let mut sessions = provider.sessions();
        assert!(sessions.borrow_and_update().is_none());

        provider.sign_in("a@b.com", "secret1").await.unwrap();
        sessions.changed().await.unwrap();
        let current = sessions.borrow_and_update().clone();
        assert_eq!(current.map(|s| s.email), Some("a@b.com".to_string()));

        provider.sign_out().await;
        sessions.changed().await.unwrap();
        assert!(sessions.borrow_and_update().is_none());
    }
}
