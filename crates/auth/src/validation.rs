//! Credential pre-validation
//!
//! Pure checks run before the identity provider is consulted, so obviously
//! malformed input never costs a round trip. One violation is reported per
//! field, evaluated independently.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum password length accepted by the sign-in form.
pub const MIN_PASSWORD_CHARS: usize = 6;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// A reason the submitted credentials cannot be sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialViolation {
    /// Email field is empty.
    MissingEmail,
    /// Email does not look like an address.
    InvalidEmail,
    /// Password field is empty.
    MissingPassword,
    /// Password is shorter than [`MIN_PASSWORD_CHARS`].
    PasswordTooShort,
}

impl std::fmt::Display for CredentialViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialViolation::MissingEmail => write!(f, "email is required"),
            CredentialViolation::InvalidEmail => write!(f, "email is invalid"),
            CredentialViolation::MissingPassword => write!(f, "password is required"),
            CredentialViolation::PasswordTooShort => {
                write!(f, "password must be at least {MIN_PASSWORD_CHARS} characters")
            }
        }
    }
}

/// Check sign-in input ahead of the provider call.
///
/// Returns every violation that fired; an empty vec means the credentials
/// are well-formed (not that they are correct).
pub fn validate_credentials(email: &str, password: &str) -> Vec<CredentialViolation> {
    let mut violations = Vec::new();

    if email.is_empty() {
        violations.push(CredentialViolation::MissingEmail);
    } else if !email_regex().is_match(email) {
        violations.push(CredentialViolation::InvalidEmail);
    }

    if password.is_empty() {
        violations.push(CredentialViolation::MissingPassword);
    } else if password.chars().count() < MIN_PASSWORD_CHARS {
        violations.push(CredentialViolation::PasswordTooShort);
    }

    violations
}
