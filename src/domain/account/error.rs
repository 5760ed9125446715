//! Account service error taxonomy

use thiserror::Error;

use super::validation::ValidationError;
use crate::domain::DomainError;

/// Outcome of a rejected registration.
///
/// Validation failures (including duplicates) are structured data meant for
/// the caller verbatim; storage failures surface only a generic message and
/// never leak internal detail.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Every validation failure collected in one pass
    #[error("registration input rejected")]
    Validation(Vec<ValidationError>),

    /// Backing store unavailable or insert failed; nothing was persisted
    #[error("Registration failed. Please try again.")]
    Storage(#[source] DomainError),
}

/// Outcome of a rejected login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier or wrong password. The two cases are deliberately
    /// indistinguishable so callers cannot probe which accounts exist.
    #[error("Invalid username/email or password")]
    InvalidCredentials,

    /// Correct credentials, but the account is disabled. Distinguishable
    /// from `InvalidCredentials` on purpose.
    #[error("Your account has been deactivated")]
    AccountDisabled,

    /// Backing store unavailable
    #[error("Login failed. Please try again.")]
    Storage(#[source] DomainError),
}
