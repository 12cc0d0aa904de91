//! Vendor authentication for SacredBazaar.
//!
//! Provides vendor registration, sign-in, the persisted session and the
//! validation for the account forms.

mod error;
mod forms;
mod store;
mod vendor;

pub use error::AuthError;
pub use forms::{
    is_valid_email, is_valid_phone, unmet_password_requirements, PasswordRequirement,
    PasswordResetRequest, RegistrationForm, SignInForm, PASSWORD_REQUIREMENTS,
};
pub use store::{CredentialStore, SESSION_KEY, VENDORS_KEY};
pub use vendor::{NewVendor, Vendor};
