//! Authentication errors.

use bazaar_catalog::FieldErrors;
use bazaar_store::StoreError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A vendor with this email is already registered.
    #[error("vendor already exists: {0}")]
    DuplicateEmail(String),

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Writing vendor or session state failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials)
    }

    /// The inline form error this failure is shown as, if any.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            AuthError::DuplicateEmail(_) => {
                Some(FieldErrors::single("email", "Email already exists"))
            }
            AuthError::InvalidCredentials => {
                Some(FieldErrors::single("password", "Invalid email or password"))
            }
            AuthError::Storage(_) => None,
        }
    }
}
