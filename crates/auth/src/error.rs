//! Error types for identity operations

use thiserror::Error;

/// Result type alias for identity operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors surfaced by an identity provider.
///
/// All of these are terminal at the caller's boundary: they are surfaced
/// once and never retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials were rejected without telling which part was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account exists for the given email.
    #[error("user not found")]
    UserNotFound,

    /// The account exists but the password does not match.
    #[error("wrong password")]
    WrongPassword,

    /// The provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}
