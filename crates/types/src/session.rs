//! Authenticated session identity

use serde::{Deserialize, Serialize};

/// An authenticated user's identity handle.
///
/// Passed explicitly into every call that needs identity rather than read
/// from ambient global state; `None` at a call site means "no authenticated
/// user" and maps to the empty view, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable user identifier assigned by the identity provider.
    pub uid: String,
    /// Email address the user signed in with.
    pub email: String,
    /// Optional profile display name.
    pub display_name: Option<String>,
}

impl Session {
    /// Create a session without a profile display name.
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
        }
    }

    /// Set the profile display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
