//! Identity provider trait definition

use async_trait::async_trait;
use tokio::sync::watch;

use opina_types::Session;

use crate::error::AuthResult;

/// Interface to the identity backend.
///
/// `sessions()` is the auth-state-changed stream: a [`watch`] receiver
/// holding the current `Session` (or `None` when signed out), updated on
/// every sign-in and sign-out. Being a watch channel it coalesces — a
/// consumer always observes the latest state, not necessarily every
/// intermediate one.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with email and password, producing a [`Session`].
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// End the current session. A no-op when nobody is signed in.
    async fn sign_out(&self);

    /// Stream of auth-state changes, starting with the current state.
    fn sessions(&self) -> watch::Receiver<Option<Session>>;
}
