//! Identity provider interface for the opina feedback pipeline
//!
//! Authentication is an external collaborator: this crate specifies its
//! interface (sign-in, sign-out, and a stream of auth-state changes) plus an
//! in-memory provider for tests and demos. Session state is never ambient;
//! consumers receive it explicitly through the [`watch`] stream or as a
//! [`Session`] value.
//!
//! [`watch`]: tokio::sync::watch

pub mod error;
pub mod memory;
pub mod provider;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use memory::MemoryIdentityProvider;
pub use provider::IdentityProvider;
pub use validation::{validate_credentials, CredentialViolation};

pub use opina_types::Session;
